// Prompt templates for the scoring strategies.
// Placeholders in braces are replaced before sending.

/// Quantitative query. Replace `{parameter}`.
pub const QUANTITATIVE_QUERY_TEMPLATE: &str =
    "What is the {parameter}? Return only the numerical value.";

/// Yes/no query. Replace `{parameter}`.
pub const BOOLEAN_QUERY_TEMPLATE: &str =
    "Does the candidate have {parameter}? Answer with True or False only.";

/// Context-stuffed question over one resume. Replace `{resume_text}`, `{question}`.
pub const RESUME_QUERY_TEMPLATE: &str = r#"Answer the question using ONLY the candidate resume below.
If the resume does not contain the answer, reply with an empty line.

CANDIDATE RESUME:
{resume_text}

QUESTION:
{question}"#;

/// Textual depth evaluation. Replace `{resume_text}`, `{parameter}`.
pub const TEXTUAL_EVALUATION_TEMPLATE: &str = r#"You are an expert evaluator for an automated recruitment pipeline. Assess the candidate's depth of knowledge in one textual parameter, based only on their resume.

Instructions:
1. Analyze the resume for detailed mentions of the evaluation parameter.
2. Look for indicators of depth: specific projects, work experience, research, publications, advanced-level explanations.
3. Assign a score from 0.0 to 100.0, with at most one decimal place.
4. Justify the score, citing the relevant parts of the resume.

CANDIDATE RESUME:
{resume_text}

EVALUATION PARAMETER:
{parameter}

Output format:
Score: [0.0 - 100.0]
Justification: [a brief, clear explanation grounded in the resume]

Now evaluate the resume."#;

/// Appended to the evaluation text to get the bare score back.
pub const TEXTUAL_SCORE_DIRECTIVE: &str = "\nBased on the given evaluation\nWhat is the score? Give the correct numerical value with no additional words";

/// Fills `{name}` placeholders in one pass over the template. Substituted values are
/// never rescanned, so a resume that itself contains `{parameter}` stays verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match vars.iter().find(|(key, _)| tail.starts_with(*key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
