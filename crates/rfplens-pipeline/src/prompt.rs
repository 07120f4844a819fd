//! Prompt rendering for the six analysis tasks
//!
//! Each task owns a fixed instruction body with designated insertion points
//! for the corpus and, for the form-filling task, the merged field
//! responses. Rendering is string assembly only: all semantic work (label
//! matching, summarization) is delegated to the generation provider.

use rfplens_domain::{AggregatedCorpus, FormFieldResponse, TaskKind};
use std::collections::BTreeMap;

/// System-role instruction, where the task carries one.
pub fn system_instruction(task: TaskKind) -> Option<&'static str> {
    match task {
        TaskKind::AnalyzeSingleRfp => Some(SINGLE_RFP_SYSTEM),
        _ => None,
    }
}

/// Render the full instruction text for `task`.
///
/// Pure: same task + same corpus + same fields always yields the same
/// string. `fields` is only consulted by [`TaskKind::FillAndReformat`].
pub fn render_prompt(
    task: TaskKind,
    corpus: &AggregatedCorpus,
    fields: Option<&BTreeMap<String, FormFieldResponse>>,
) -> String {
    match task {
        TaskKind::AnalyzeSingleRfp => {
            format!("{SINGLE_RFP_INSTRUCTIONS}\n\nContent: {}", corpus.text)
        }
        TaskKind::AnalyzeMultiRfp => {
            format!("{MULTI_RFP_INSTRUCTIONS}\n\nRFP Content: {}", corpus.text)
        }
        TaskKind::AnalyzeMultiRfpStrategic => {
            format!("{STRATEGIC_INSTRUCTIONS}\n\nRFP Content: {}", corpus.text)
        }
        TaskKind::ListFillableFields => {
            format!("{FILLABLE_FIELDS_INSTRUCTIONS}\n\nContent: {}", corpus.text)
        }
        TaskKind::FillAndReformat => {
            let mut field_block = String::new();
            if let Some(fields) = fields {
                for field in fields.values() {
                    field_block.push_str(&format!("- {}: {}\n", field.name, field.value));
                }
            }
            format!(
                "{FILL_PREAMBLE}\n\n\
                 **FORM FIELD RESPONSES TO USE:**\n{field_block}\n\
                 **DOCUMENT CONTENT:**\n{}\n\n\
                 {FILL_INSTRUCTIONS}",
                corpus.text
            )
        }
        TaskKind::DraftResponse => {
            format!("{DRAFT_RESPONSE_INSTRUCTIONS}\n\nRFP Content: {}", corpus.text)
        }
    }
}

const SINGLE_RFP_SYSTEM: &str = "You are an expert at analyzing RFP (Request for Proposal) \
documents. Extract key information including what services/products are being requested, \
requirements, due dates, and submission guidelines. Be concise but comprehensive.";

const SINGLE_RFP_INSTRUCTIONS: &str = "\
Please analyze this RFP content and provide a summary that includes:
1. What services/products are being requested
2. Key requirements and qualifications
3. Due date and submission deadline
4. Budget or value (if mentioned)
5. Key contact information
6. Important submission requirements";

const MULTI_RFP_INSTRUCTIONS: &str = "\
Scan these RFP documents from the perspective of someone who is trying to win the bid from \
the government. Analyze ALL documents together and consolidate findings into three main \
topics. Do NOT organize by individual document names. Provide a comprehensive analysis \
formatted with **bold headers** and bullet points:

**Requirements for the Contract**
Consolidate all contract requirements from across all documents:
\u{2022} [Detailed requirement 1 with specifics on how to meet it]
\u{2022} [Detailed requirement 2 with specifics on how to meet it]
\u{2022} [Detailed requirement 3 with specifics on how to meet it]
\u{2022} [Additional requirements as needed]

**Evaluation Criteria that the Government is Evaluating On**
Consolidate all evaluation criteria from across all documents:
\u{2022} [Evaluation criterion 1 with scoring/weighting and strategy to excel]
\u{2022} [Evaluation criterion 2 with scoring/weighting and strategy to excel]
\u{2022} [Evaluation criterion 3 with scoring/weighting and strategy to excel]
\u{2022} [Additional criteria as needed]

**Deadlines**
Consolidate all deadlines and important dates from across all documents:
\u{2022} [Critical deadline 1 with specific date, time, and what's due]
\u{2022} [Critical deadline 2 with specific date, time, and what's due]
\u{2022} [Critical deadline 3 with specific date, time, and what's due]
\u{2022} [Additional deadlines as needed]

Focus on providing strategic insights that will help win this government contract. \
Synthesize information from all documents into these three consolidated sections.";

const STRATEGIC_INSTRUCTIONS: &str = "\
CRITICAL ANALYSIS: Review these RFP documents with the critical lens of a competitive \
bidder who is determined to win this government contract. You must identify every \
advantage, risk, and strategic opportunity. Analyze ALL documents together and consolidate \
findings into three main topics. Do NOT organize by individual document names.

**Requirements for the Contract**
Consolidate all contract requirements from across all documents with a winning strategy focus:
\u{2022} [Critical requirement 1: What's required + How to exceed expectations + Competitive advantage opportunities]
\u{2022} [Critical requirement 2: What's required + How to exceed expectations + Competitive advantage opportunities]
\u{2022} [Critical requirement 3: What's required + How to exceed expectations + Competitive advantage opportunities]
\u{2022} [Additional requirements with strategic insights]

**Evaluation Criteria that the Government is Evaluating On**
Consolidate all evaluation criteria with scoring intelligence and winning tactics:
\u{2022} [Evaluation criterion 1: Scoring/weighting + What wins points + How to maximize score + Common competitor weaknesses]
\u{2022} [Evaluation criterion 2: Scoring/weighting + What wins points + How to maximize score + Common competitor weaknesses]
\u{2022} [Evaluation criterion 3: Scoring/weighting + What wins points + How to maximize score + Common competitor weaknesses]
\u{2022} [Additional criteria with tactical insights]

**Deadlines**
Consolidate all critical deadlines with strategic timing considerations:
\u{2022} [Critical deadline 1: Date/time + What's due + Strategic preparation timeline + Risk mitigation]
\u{2022} [Critical deadline 2: Date/time + What's due + Strategic preparation timeline + Risk mitigation]
\u{2022} [Critical deadline 3: Date/time + What's due + Strategic preparation timeline + Risk mitigation]
\u{2022} [Additional deadlines with strategic timing insights]

WINNING MINDSET: Provide insights that give this bidder a competitive edge. Identify what \
the government truly values, where competitors typically fail, and how to position for \
maximum scoring advantage.";

const FILLABLE_FIELDS_INSTRUCTIONS: &str = "\
Analyze these RFP package documents to identify all items that need to be filled out by \
the bidder. Look for:
- Questions (anything with a question mark ?)
- Checkboxes ([ ] or \u{2610})
- Form fields with colons followed by blank lines or underscores (:______)
- Signature lines
- Date fields
- Any other fields requiring bidder input

**Requirements for Completion**

Organize your findings by document and list each fillable item:

**[Document Name 1]**
\u{2022} [Question or field description]: [Type of response needed]
\u{2022} [Question or field description]: [Type of response needed]
\u{2022} [Question or field description]: [Type of response needed]

**[Document Name 2]**
\u{2022} [Question or field description]: [Type of response needed]
\u{2022} [Question or field description]: [Type of response needed]

Use **bold** formatting for document names. Be thorough and specific about what type of \
response is needed for each field (text, date, signature, checkbox, etc.).";

const FILL_PREAMBLE: &str = "\
Convert these RFP attachment documents to text with clean formatting. FILL IN all empty \
fields and blank lines using the form field responses provided:";

const FILL_INSTRUCTIONS: &str = "\
**INSTRUCTIONS:**
- Clean up the formatting to remove floating letters or words that appear in isolated paragraphs
- Use **bold** ONLY for major section headers and form field labels that need responses
- Do NOT bold regular content, certifications, legal requirements, or list items
- Use bullet points (\u{2022}) for lists of items, certifications, and requirements
- Group related content together into coherent paragraphs
- FILL IN all blank lines, empty fields, and spaces after colons (:) with the appropriate responses from the form fields
- When you see \"Name of Authorized Representative:\" or similar, fill it with the value from \"Name of Authorized Representative\" field
- When you see \"Title:\" fill it with the value from \"Title\" field
- When you see \"Date:\" fill it with the value from \"Date\" field
- When you see \"Signature:\" fill it with the appropriate name from the form fields
- For Yes/No questions, use the exact response provided (Yes or No)
- Leave checkboxes as [ ] without adding any check marks unless a specific checkbox response is provided
- Match form field names to document field requests intelligently (e.g., \"Name of Offerer/Bidder Firm\" matches requests for company name, bidder name, etc.)
- Maintain logical structure but eliminate awkward spacing and orphaned text
- Ensure each paragraph contains complete thoughts and sentences

**EXAMPLE OF PROPER FORMATTING:**
Items like \"Affirmation of Understanding of and Agreement pursuant to State Finance Law \
\u{a7}139-j (3) and \u{a7}139-j (6) (b)\" should be formatted as bullet points, NOT bolded:
\u{2022} Affirmation of Understanding of and Agreement pursuant to State Finance Law \u{a7}139-j (3) and \u{a7}139-j (6) (b)
\u{2022} Offerer's Certification of Compliance with State Finance Law \u{a7}139-k(5)
\u{2022} Offerer Disclosure of Prior Non-Responsibility Determinations";

const DRAFT_RESPONSE_INSTRUCTIONS: &str = "\
Read through the uploaded RFP documents with a critical eye and in the lens of a bidder to \
draft an RFP response. Use a professional RFP response template structure with these sections:

**Executive Summary**
Provide a compelling overview of your proposal and why you're the best choice for this contract.

**Company Overview**
Brief description of your company, experience, and qualifications relevant to this RFP.

**Understanding of Requirements**
Demonstrate your understanding of the project requirements and scope of work.

**Proposed Solution**
Detail your approach to meeting the requirements, including methodology, timeline, and deliverables.

**Team and Qualifications**
Highlight your team's experience and qualifications relevant to this project.

**Pricing and Budget**
Provide pricing structure and budget breakdown (use placeholder information if specific pricing isn't available).

**Timeline and Milestones**
Propose a realistic timeline with key milestones and deliverables.

**Risk Management**
Identify potential risks and your mitigation strategies.

**Conclusion**
Summarize why you're the best choice and reinforce your value proposition.

Use the details from the RFP documents to craft relevant, specific content for each \
section. Be professional, compelling, and demonstrate clear understanding of the requirements.";

#[cfg(test)]
mod tests {
    use super::*;
    use rfplens_domain::{aggregate, merge_fields, ExtractedDocument, FieldType};

    fn corpus(text: &str) -> AggregatedCorpus {
        aggregate(&[ExtractedDocument::ok("rfp.pdf", text)], 15_000)
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let corpus = corpus("Budget: $50,000");
        let a = render_prompt(TaskKind::AnalyzeMultiRfp, &corpus, None);
        let b = render_prompt(TaskKind::AnalyzeMultiRfp, &corpus, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_task_embeds_the_corpus() {
        let corpus = corpus("UNIQUE-CORPUS-SENTINEL");
        let fields = merge_fields(vec![]);
        for task in TaskKind::ALL {
            let prompt = render_prompt(task, &corpus, Some(&fields));
            assert!(
                prompt.contains("UNIQUE-CORPUS-SENTINEL"),
                "{task} prompt missing corpus"
            );
        }
    }

    #[test]
    fn test_single_rfp_task_carries_system_instruction() {
        assert!(system_instruction(TaskKind::AnalyzeSingleRfp)
            .unwrap()
            .contains("expert at analyzing RFP"));
        assert!(system_instruction(TaskKind::DraftResponse).is_none());
    }

    #[test]
    fn test_fill_task_lists_merged_fields_ahead_of_corpus() {
        let corpus = corpus("Name of Authorized Representative: ______");
        let fields = merge_fields(vec![
            FormFieldResponse::new("Title:", "Director", FieldType::Text),
            FormFieldResponse::new("Date:", "2025-06-01", FieldType::Date),
        ]);

        let prompt = render_prompt(TaskKind::FillAndReformat, &corpus, Some(&fields));
        assert!(prompt.contains("- Title:: Director"));
        assert!(prompt.contains("- Date:: 2025-06-01"));

        let fields_at = prompt.find("**FORM FIELD RESPONSES TO USE:**").unwrap();
        let corpus_at = prompt.find("**DOCUMENT CONTENT:**").unwrap();
        assert!(fields_at < corpus_at);
    }

    #[test]
    fn test_strategic_and_consolidated_variants_differ() {
        let corpus = corpus("text");
        let consolidated = render_prompt(TaskKind::AnalyzeMultiRfp, &corpus, None);
        let strategic = render_prompt(TaskKind::AnalyzeMultiRfpStrategic, &corpus, None);
        assert!(strategic.contains("CRITICAL ANALYSIS"));
        assert!(!consolidated.contains("CRITICAL ANALYSIS"));
        assert!(consolidated.contains("**Deadlines**"));
        assert!(strategic.contains("**Deadlines**"));
    }
}
