// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Persona preamble for every resume-writing prompt.
pub const ATS_WRITER_PREAMBLE: &str = "You are an expert ATS (Applicant Tracking System) \
    resume writer with 10+ years of experience. Create a professional, ATS-optimized \
    resume that will pass automated screening systems.";

/// ATS formatting rules appended to generation prompts.
pub const ATS_OPTIMIZATION_RULES: &str = "\
CRITICAL ATS OPTIMIZATION RULES:
1. Use standard section headers (no creative names)
2. Include action verbs: Developed, Implemented, Designed, Led, Optimized, Architected, Collaborated, Achieved
3. Add metrics and numbers: percentages, timelines, team sizes, user counts
4. Incorporate keywords naturally from the job description
5. Use industry-standard terminology and acronyms
6. Keep formatting simple (no tables, columns, or graphics)
7. Make content scannable with bullet points
8. Ensure technical skills match job requirements
9. Show impact and results, not just responsibilities
10. Maintain consistent date formats and tenses";

/// Plain-text-only instruction; markdown in the response is stripped anyway.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Respond in plain text. Do NOT use markdown \
    headings, tables, or code fences. Use \"• \" for bullet points.";
