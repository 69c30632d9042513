//! Deterministic fallback content.
//!
//! Pure and network-free: every function here is a fixed template keyed by the
//! target role. Used when no service is configured, when every attempt fails,
//! and as the last rung of the per-section repair ladder.

use std::collections::HashSet;

use crate::models::{RawInput, Resume, Section};

/// Skills list cap for merged user + canned skills.
pub const MAX_SKILLS: usize = 15;
/// User text at or below this many characters is replaced by a template.
const MIN_SECTION_CHARS: usize = 20;
const MIN_CERTIFICATIONS_CHARS: usize = 10;

/// Role keyword → canned skills. Matched by substring of the lowercased role,
/// first key wins.
const ROLE_SKILL_SETS: &[(&str, &str)] = &[
    (
        "software",
        "Python, JavaScript, Java, React, Node.js, HTML/CSS, SQL, Git, RESTful APIs, \
         Agile Development, Problem Solving, Team Collaboration, Communication, Time Management",
    ),
    (
        "developer",
        "JavaScript, Python, React, Angular, Node.js, Express, MongoDB, SQL, Git, Docker, \
         RESTful APIs, Responsive Design, Problem Solving, Debugging, Team Collaboration",
    ),
    (
        "engineer",
        "Python, Java, C++, Data Structures, Algorithms, System Design, Git, Linux, Testing, \
         CI/CD, Problem Solving, Analytical Thinking, Communication, Team Collaboration",
    ),
    (
        "data",
        "Python, SQL, R, Pandas, NumPy, Scikit-learn, Tableau, Power BI, Statistics, \
         Machine Learning, Data Visualization, Excel, Problem Solving, Analytical Thinking, Communication",
    ),
    (
        "analyst",
        "SQL, Python, Excel, Tableau, Power BI, Data Analysis, Statistical Analysis, \
         Data Visualization, Critical Thinking, Problem Solving, Communication, Attention to Detail",
    ),
    (
        "design",
        "Figma, Adobe XD, Sketch, Photoshop, Illustrator, UI/UX Design, Prototyping, Wireframing, \
         User Research, Visual Design, Creativity, Communication, Collaboration",
    ),
    (
        "product",
        "Product Strategy, Roadmap Planning, User Stories, Agile/Scrum, JIRA, Market Research, \
         Data Analysis, Stakeholder Management, Communication, Leadership, Problem Solving",
    ),
    (
        "marketing",
        "Digital Marketing, SEO/SEM, Google Analytics, Social Media Marketing, Content Creation, \
         Email Marketing, A/B Testing, Communication, Creativity, Data Analysis",
    ),
];

const GENERIC_SKILLS: &str = "Communication, Problem Solving, Team Collaboration, \
    Critical Thinking, Time Management, Adaptability, Leadership, Attention to Detail, \
    Project Management, Microsoft Office";

// ────────────────────────────────────────────────────────────────────────────
// Section templates
// ────────────────────────────────────────────────────────────────────────────

pub fn default_summary(role: &str) -> String {
    format!(
        "Motivated {role} with strong technical aptitude and passion for innovation. \
         Demonstrated ability to quickly learn new technologies and contribute to team success. \
         Seeking opportunities to apply skills in {} and drive impactful results through \
         creative problem-solving and collaboration.",
        role.to_lowercase()
    )
}

pub fn default_skills(role: &str) -> &'static str {
    let role_lower = role.to_lowercase();
    ROLE_SKILL_SETS
        .iter()
        .find(|(key, _)| role_lower.contains(key))
        .map(|(_, skills)| *skills)
        .unwrap_or(GENERIC_SKILLS)
}

/// User skills first (original order), then canned skills; duplicates removed
/// case-insensitively keeping the first spelling; capped at `MAX_SKILLS`.
pub fn merge_skills(user_skills: &str, fallback_skills: &str) -> String {
    let mut seen = HashSet::new();
    user_skills
        .split(',')
        .chain(fallback_skills.split(','))
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .filter(|skill| seen.insert(skill.to_lowercase()))
        .take(MAX_SKILLS)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn default_experience(role: &str) -> String {
    format!(
        "{role} Intern | Tech Company
June 2023 - August 2023
• Collaborated with cross-functional team of 6 members to develop and deploy new features for production applications
• Contributed to codebase improvements resulting in 15% performance enhancement and better code maintainability
• Participated in Agile ceremonies including daily standups, sprint planning, and retrospectives
• Gained hands-on experience with industry-standard tools, best practices, and professional development workflows

Student Technical Assistant | University Computer Lab
September 2022 - May 2023
• Provided technical support and guidance to 200+ students on software tools and programming concepts
• Troubleshot and resolved technical issues, improving lab efficiency by 20%
• Conducted peer tutoring sessions on programming fundamentals and debugging techniques"
    )
}

pub fn default_projects(role: &str) -> String {
    let role_lower = role.to_lowercase();

    if ["software", "developer", "engineer"]
        .iter()
        .any(|k| role_lower.contains(k))
    {
        "E-Commerce Web Application | React, Node.js, MongoDB, Stripe
• Built full-stack online shopping platform with user authentication, product catalog, and secure payment integration
• Implemented shopping cart, order management, and admin dashboard with real-time inventory tracking
• Achieved 95% test coverage using Jest and React Testing Library
• Deployed on AWS EC2 with automated CI/CD pipeline using GitHub Actions

Task Management System | Python, Django, PostgreSQL, Docker
• Developed collaborative project management tool with real-time updates using WebSockets
• Designed and implemented RESTful API with JWT authentication serving 20+ endpoints
• Created responsive UI with drag-and-drop functionality for intuitive task organization
• Containerized application using Docker for consistent deployment across environments"
            .to_string()
    } else if role_lower.contains("data") {
        "Customer Segmentation Analysis | Python, Pandas, Scikit-learn, Tableau
• Analyzed 50,000+ customer records to identify distinct market segments using K-means clustering
• Built predictive model achieving 87% accuracy in customer behavior classification
• Created interactive Tableau dashboard for business stakeholders to explore insights
• Recommendations led to 15% improvement in targeted marketing campaign effectiveness

Sales Forecasting Model | Python, Time Series Analysis, Prophet
• Developed time series forecasting model to predict monthly sales with 92% accuracy
• Processed and cleaned 3 years of historical sales data across multiple product categories
• Implemented automated data pipeline for daily model updates and predictions
• Presented findings to management team with actionable business insights"
            .to_string()
    } else {
        format!(
            "Personal Portfolio Website | HTML, CSS, JavaScript
• Designed and developed professional portfolio showcasing projects and technical skills
• Implemented responsive design ensuring optimal viewing across devices and screen sizes
• Integrated contact form with email functionality and added smooth animations
• Deployed using GitHub Pages with custom domain

Capstone Project: {role} Application
• Led team of 4 in developing comprehensive solution addressing real-world problem
• Applied Agile methodology with 2-week sprints and regular stakeholder presentations
• Conducted user testing with 25+ participants and incorporated feedback iteratively
• Presented final product to faculty panel and received distinction grade"
        )
    }
}

pub fn default_education() -> String {
    "Bachelor of Technology in Computer Science
University Name
Expected Graduation: May 2024
CGPA: 8.2/10
Relevant Coursework: Data Structures and Algorithms, Database Management Systems, Web Technologies, Software Engineering, Operating Systems"
        .to_string()
}

pub fn default_certifications(role: &str) -> String {
    let role_lower = role.to_lowercase();

    if role_lower.contains("software") || role_lower.contains("developer") {
        "• Full Stack Web Development - freeCodeCamp (2023)
• JavaScript Algorithms and Data Structures - Coursera (2023)
• Git and GitHub Essentials - LinkedIn Learning (2023)"
    } else if role_lower.contains("data") {
        "• Google Data Analytics Professional Certificate - Google (2023)
• Python for Data Science - IBM Coursera (2023)
• SQL for Data Analysis - Udacity (2023)"
    } else {
        "• Relevant Professional Development Courses - Online Platforms (2023)
• Technical Skill Certifications - Industry-Recognized Programs
• Continuing Education in Field of Specialization"
    }
    .to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Synthesized default for one section, ignoring any user text except skills,
/// which are always merged in front of the canned list.
pub fn synthesize_section(section: Section, input: &RawInput) -> String {
    let role = &input.target_role;
    match section {
        Section::Summary => default_summary(role),
        Section::Skills => merge_skills(&input.skills, default_skills(role)),
        Section::Experience => default_experience(role),
        Section::Projects => default_projects(role),
        Section::Education => default_education(),
        Section::Certifications => default_certifications(role),
    }
}

/// Builds a complete resume without any service call.
///
/// Skills are always the merged list; other sections keep the candidate's
/// text when it is long enough to be meaningful.
pub fn build_fallback_resume(input: &RawInput) -> Resume {
    let mut resume = Resume::for_candidate(input);

    for section in Section::ALL {
        let min_chars = match section {
            Section::Certifications => MIN_CERTIFICATIONS_CHARS,
            _ => MIN_SECTION_CHARS,
        };
        let text = match (section, input.provided(section)) {
            (Section::Skills, _) => synthesize_section(section, input),
            (_, Some(user)) if user.chars().count() > min_chars => user.to_string(),
            _ => synthesize_section(section, input),
        };
        resume.set_section(section, text);
    }

    resume
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(role: &str) -> RawInput {
        RawInput {
            full_name: "Grace Hopper".to_string(),
            phone: "+1 555 010 0199".to_string(),
            email: "grace@example.com".to_string(),
            target_role: role.to_string(),
            ..RawInput::default()
        }
    }

    #[test]
    fn test_skills_dedup_keeps_user_order_then_fallback() {
        let merged = merge_skills("Python, React, Python", default_skills("Software Engineer"));
        let skills: Vec<&str> = merged.split(", ").collect();

        assert_eq!(&skills[..2], &["Python", "React"]);
        assert!(skills.len() <= MAX_SKILLS);

        let mut lowered: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
        lowered.sort();
        lowered.dedup();
        assert_eq!(lowered.len(), skills.len(), "every skill exactly once: {merged}");
        assert_eq!(skills.iter().filter(|s| **s == "React").count(), 1);
        assert_eq!(skills[2], "JavaScript", "fallback list follows user skills");
    }

    #[test]
    fn test_merge_skills_caps_at_fifteen() {
        let user = (1..=20).map(|i| format!("Skill{i}")).collect::<Vec<_>>().join(", ");
        let merged = merge_skills(&user, GENERIC_SKILLS);
        assert_eq!(merged.split(", ").count(), MAX_SKILLS);
        assert!(merged.ends_with("Skill15"));
    }

    #[test]
    fn test_default_skills_first_matching_key_wins() {
        // "software" precedes "engineer" in the table
        assert!(default_skills("Senior Software Engineer").contains("HTML/CSS"));
        assert!(default_skills("Data Engineer").contains("C++"));
        assert!(default_skills("Data Scientist").contains("Pandas"));
        assert_eq!(default_skills("Chef"), GENERIC_SKILLS);
    }

    #[test]
    fn test_summary_interpolates_role() {
        let summary = default_summary("Product Manager");
        assert!(summary.starts_with("Motivated Product Manager"));
        assert!(summary.contains("skills in product manager"));
    }

    #[test]
    fn test_projects_template_selected_by_role() {
        assert!(default_projects("Backend Developer").contains("E-Commerce"));
        assert!(default_projects("Data Analyst").contains("Customer Segmentation"));
        assert!(default_projects("Teacher").contains("Capstone Project: Teacher Application"));
    }

    #[test]
    fn test_fallback_resume_is_complete() {
        for role in ["Software Engineer", "Data Scientist", "Chef", "UX Designer"] {
            let resume = build_fallback_resume(&input(role));
            assert!(resume.is_complete(), "incomplete fallback for {role}");
            assert_eq!(resume.target_role, role);
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let submission = RawInput {
            skills: "Rust, Go".to_string(),
            job_description: "Build distributed systems".to_string(),
            ..input("Software Engineer")
        };
        assert_eq!(
            build_fallback_resume(&submission),
            build_fallback_resume(&submission)
        );
    }

    #[test]
    fn test_fallback_keeps_long_user_text_and_replaces_short() {
        let submission = RawInput {
            experience: "Backend Engineer at Initech, 2021-2024".to_string(),
            education: "BSc".to_string(),
            certifications: "AWS SAA 2023".to_string(),
            ..input("Software Engineer")
        };
        let resume = build_fallback_resume(&submission);
        assert_eq!(resume.experience, "Backend Engineer at Initech, 2021-2024");
        assert_eq!(resume.education, default_education());
        assert_eq!(resume.certifications, "AWS SAA 2023");
    }
}
