// LLM prompt constants for résumé review.

/// System prompt for the review call. Enforces JSON-only output.
pub const REVIEW_SYSTEM: &str = "You are an experienced technical recruiter and résumé editor. \
    You review résumés and rewrite them to be clearer and more impactful. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Review prompt template. Replace `{resume_text}` before sending.
pub const REVIEW_PROMPT_TEMPLATE: &str = r###"Review the résumé below and return a JSON object with this EXACT schema (no extra fields):
{
  "content": {
    "rating": 0,
    "critique": ["..."],
    "suggestions": ["..."]
  },
  "presentation": {
    "rating": 0,
    "critique": ["..."],
    "suggestions": ["..."]
  },
  "corrected_resume": "..."
}

Rules:
- "content" judges substance: impact, metrics, relevance, completeness of experience and skills.
- "presentation" judges structure, formatting, consistency and readability.
- "rating" is an integer from 0 to 100.
- "critique" lists concrete weaknesses; "suggestions" lists concrete, actionable fixes. 2 – 6 items each.
- "corrected_resume" is the full improved résumé in Markdown. Keep the original section order
  and every factual detail (names, employers, dates, degrees). Do NOT invent employers, dates,
  degrees or numbers that are not in the original. Rephrase, tighten and reformat only.
- Use "# " for the candidate name, "## " for section headings and "- " for bullets.

RÉSUMÉ:
{resume_text}"###;
