// Recommended jobs: LinkedIn guest-API scraping, an in-memory job board, and the
// job list / detail endpoints. Ranking jobs against a résumé is not done here.

pub mod board;
pub mod handlers;
pub mod linkedin;
pub mod models;
