// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{ATS_OPTIMIZATION_RULES, ATS_WRITER_PREAMBLE, PLAIN_TEXT_INSTRUCTION};
use crate::models::{RawInput, Section};

/// Characters of the job description embedded in the prompt.
pub const JD_PROMPT_CHARS: usize = 1500;

/// Resume generation prompt template.
/// Replace: {preamble}, {name}, {email}, {phone}, {role}, {education},
///          {experience}, {projects}, {skills}, {certifications},
///          {jd_block}, {ats_rules}, {plain_text}
///
/// CONTRACT: the six section headers below are the delimiters the segmenter
/// splits on. They must stay literal, in this order, each on its own line.
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"{preamble}

CANDIDATE INFORMATION:
Name: {name}
Email: {email}
Phone: {phone}
Target Role: {role}

PROVIDED INFORMATION:
Education: {education}
Experience: {experience}
Projects: {projects}
Skills: {skills}
Certifications: {certifications}
{jd_block}
OUTPUT REQUIREMENTS:

Generate a complete ATS-optimized resume using EXACTLY these section headers, each on its own line, in this order:

PROFESSIONAL SUMMARY:
[A compelling 2-3 sentence summary highlighting the candidate's key qualifications for the target role, 2-3 core technical competencies, and career direction.]

SKILLS:
[12-15 relevant skills, comma-separated, technical skills first, then soft skills.]

EXPERIENCE:
[1-2 professional experiences in this format:
Job Title | Company Name
Month Year - Month Year (or "Present")
• Achievement with a quantifiable metric, starting with an action verb
• Technical contribution naming specific technologies
• Business impact
• Collaboration or leadership
If no experience was provided, create realistic internship or project-based experience.]

PROJECTS:
[2-3 projects in this format:
Project Name | Technologies Used
• Problem statement or goal
• Technical implementation
• Measurable results or impact]

EDUCATION:
[Degree Name
University/College Name
Graduation or Expected Graduation: Month Year
Optional relevant coursework]

CERTIFICATIONS:
[• Certification Name - Issuing Organization (Year)
• Achievement or Award - Organization (Year)]

{ats_rules}

IMPORTANT:
- Generate realistic, professional content specific to the {role} role
- Use the EXACT section headers provided above and no others
- {plain_text}

Generate the complete resume now:"#;

/// Appended to the prompt when a job description is present.
/// Replace: {jd_text}
pub const JD_BLOCK_TEMPLATE: &str = r#"
TARGET JOB DESCRIPTION:
{jd_text}

CRITICAL: Carefully analyze this job description and:
1. Extract key technical skills, tools, and technologies mentioned
2. Identify important keywords and phrases
3. Match the experience level and requirements
4. Incorporate these naturally throughout the resume
"#;

/// Instruction substituted for a section the candidate left blank.
fn synthesize_instruction(section: Section) -> &'static str {
    match section {
        Section::Summary => "Not provided - write a summary for this role",
        Section::Skills => "Not provided - suggest comprehensive technical and soft skills",
        Section::Experience => "Not provided - create relevant entry-level or internship experience",
        Section::Projects => "Not provided - create 2-3 relevant technical projects",
        Section::Education => {
            "Not provided - please create appropriate education for this role"
        }
        Section::Certifications => {
            "Not provided - suggest relevant certifications if appropriate"
        }
    }
}

/// Builds the single generation prompt for a submission.
/// Deterministic: the same input always yields the same prompt.
pub fn build_generation_prompt(input: &RawInput) -> String {
    let provided = |section: Section| {
        input
            .provided(section)
            .unwrap_or_else(|| synthesize_instruction(section))
    };

    let jd_block = if input.has_job_description() {
        fill_template(
            JD_BLOCK_TEMPLATE,
            &[(
                "jd_text",
                truncate_chars(input.job_description.trim(), JD_PROMPT_CHARS),
            )],
        )
    } else {
        String::new()
    };

    fill_template(
        GENERATION_PROMPT_TEMPLATE,
        &[
            ("preamble", ATS_WRITER_PREAMBLE),
            ("ats_rules", ATS_OPTIMIZATION_RULES),
            ("plain_text", PLAIN_TEXT_INSTRUCTION),
            ("name", input.full_name.as_str()),
            ("email", input.email.as_str()),
            ("phone", input.phone.as_str()),
            ("role", input.target_role.as_str()),
            ("education", provided(Section::Education)),
            ("experience", provided(Section::Experience)),
            ("projects", provided(Section::Projects)),
            ("skills", provided(Section::Skills)),
            ("certifications", provided(Section::Certifications)),
            ("jd_block", jd_block.as_str()),
        ],
    )
}

/// Substitutes `{key}` placeholders in a single left-to-right pass.
///
/// Substituted values are copied verbatim and never scanned again, so
/// brace text inside candidate input survives. Unknown `{...}` stays as is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
