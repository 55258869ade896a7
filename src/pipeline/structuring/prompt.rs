pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"
You are a maritime document structuring assistant. Your ONLY role is to
convert the raw text of a Statement of Facts (SOF) into the structured JSON
format described by the response schema.

RULES:
1. Extract ONLY information explicitly stated in the document.
2. NEVER infer or invent values that are not directly written.
3. If a field is unclear or missing, output null for that field.
4. Preserve exact values (quantities, dates, times) verbatim from the document.
5. List events in the order they appear in the document.
6. Output MUST be a single JSON object conforming to the response schema.
"#;

/// Build the extraction prompt for one document's raw text.
pub fn build_extraction_prompt(raw_text: &str) -> String {
    format!(
        r#"You are given a Statement of Facts (SOF) document.
Extract its details into the response schema.

Guidelines:
- If information is clearly present, do not leave fields blank.
- If start and end times are given, calculate duration_hours.
- Include notes on weather, delays, tug usage, approvals, and laytime.
- Only leave null if the data is truly missing.

--- DOCUMENT TEXT ---
{raw_text}
--- END DOCUMENT ---
"#
    )
}
