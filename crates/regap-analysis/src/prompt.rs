//! Prompt builders for the text-generation service.
//!
//! Two flows exist. The default single-call flow asks for the verdict
//! directly in table form. The two-call flow first asks for a free-text
//! covered/missing verdict and then, in a second call, asks the service to
//! reformat that verdict as a table. Both templates are deterministic:
//! identical inputs produce identical prompts.

use regap_core::Chunk;

/// Which prompt flow the orchestrator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptFlow {
    /// One call, table output mandated in the prompt (default).
    #[default]
    DirectTable,
    /// Free-text verdict call followed by a table-reformat call.
    TwoCall,
}

fn retrieved_sections(retrieved: &[(&Chunk, f32)]) -> String {
    let mut text = String::new();
    for (chunk, _) in retrieved {
        text.push('\n');
        text.push_str(&chunk.section_text());
    }
    text
}

/// Build the single-call gap-analysis prompt mandating direct table output.
pub fn build_gap_prompt(retrieved: &[(&Chunk, f32)], article: &str) -> String {
    let concept_text = retrieved_sections(retrieved);

    format!(
        r#"You are an expert in market conduct regulation for banks and a senior regulatory compliance consultant conducting a professional gap analysis between a company's internal documentation and regulatory requirements.

**YOUR TASK:**
Analyze the regulatory article below and identify EVERY requirement. For each requirement, evaluate whether the company's concept document adequately addresses it. Output your findings DIRECTLY in table format.

**ANALYSIS CRITERIA:**
- "Yes" = Requirement is FULLY addressed with specific controls, procedures, or evidence
- "Partial" = Requirement is mentioned but lacks sufficient detail, procedures, or implementation guidance
- "No" = Requirement is NOT addressed or missing entirely

**OUTPUT FORMAT:**
Create a table with EXACTLY these columns (use | as separator):
Requirement | Covered | Reference | Comment

**COLUMN SPECIFICATIONS:**
1. **Requirement**: Clear description of what the regulatory article requires (30-60 words). Be specific about WHAT must be done.
2. **Covered**: Only use "Yes", "Partial", or "No"
3. **Reference**: Exact section/subsection name from company document where requirement is addressed. Use "-" if not covered.
4. **Comment**: DETAILED professional assessment (MINIMUM 30 words, aim for 40 words) explaining:
   - For "Yes": Describe HOW the requirement is met, WHICH controls/procedures/evidence exist, and WHERE in the document they are documented. Include specific details about implementation.
   - For "Partial": Explain in detail WHAT aspects are covered, reference specific sections, then clearly describe WHAT specific elements/details/procedures are missing or inadequate. Provide recommendations.
   - For "No": Describe WHAT specific controls/procedures/documentation need to be implemented, WHY they are required by regulation, and provide actionable recommendations for compliance.

**QUALITY STANDARDS:**
- Comments MUST be detailed and comprehensive (minimum 30 words each)
- Be specific and actionable in all assessments
- Always reference exact sections from the company document
- Identify missing elements with specific details
- Write in professional business language suitable for executive review
- Provide actionable recommendations where gaps exist
- Each requirement must be on a separate row
- NEVER use short phrases - always write full explanatory sentences

**REGULATORY ARTICLE TO ANALYZE:**
{article}

**COMPANY CONCEPT DOCUMENT:**
{concept_text}

**OUTPUT YOUR GAP ANALYSIS TABLE BELOW (start immediately with data rows, no headers needed):**"#
    )
}

/// Build the first prompt of the two-call flow: a free-text
/// covered/missing requirements verdict.
pub fn build_freeform_prompt(retrieved: &[(&Chunk, f32)], article: &str) -> String {
    let concept_text = retrieved_sections(retrieved);

    format!(
        r#"You are an expert in concept analysis. Your task is to evaluate a provided concept against the requirements outlined in an article. Follow these instructions:
    1. Read the article to identify all its requirements.
    2. Compare the concept against these requirements.
    3. Output one of the following:
        - Covered Requirements: List all the requirements from the article that are fully addressed in the concept. For each covered requirement, specify the full section name and subsection (if applicable) of the concept that covers it.
        - Missing Requirements: List all the requirements from the article that are not addressed or only partially addressed in the concept.

Article:
<article>
{article}
</article>

Concept:
<concept>
{concept_text}
</concept>"#
    )
}

/// Build the second prompt of the two-call flow: reformat a free-text
/// verdict as a pipe-delimited table.
pub fn build_table_prompt(verdict: &str) -> String {
    format!(
        r#"Convert the given list of covered and missing requirements into a table. The table should have four columns (use | as separator):
1. Requirement: The short summary of the requirement.
2. Covered: Indicate whether the requirement is "Yes" (covered), "Partial" (partially covered), or "No" (missing).
3. Reference: If covered, the title of the specific section or subsection in the concept that addresses the requirement. If not covered, use "-".
4. Comment: The full sentence related to the requirement without changing it.

If there are no missing requirements, do not include rows for missing requirements in the table. Output data rows only, no header row.

Requirements list:
<list>
{verdict}
</list>"#
    )
}
