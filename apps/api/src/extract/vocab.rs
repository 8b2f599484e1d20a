//! Fixed vocabulary tables for resume field extraction. Immutable static
//! data, not configuration; matching logic stays in pure functions over
//! these tables.

/// Skill vocabulary tested against resume text. The entry's casing here is
/// the canonical casing reported back to callers.
pub const COMMON_SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Express",
    "Next.js",
    "Python",
    "Django",
    "Flask",
    "Java",
    "Spring",
    "C#",
    ".NET",
    "Go",
    "Rust",
    "PHP",
    "Laravel",
    "Ruby",
    "Rails",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "CI/CD",
    "Git",
    "SQL",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "GraphQL",
    "REST API",
    "Microservices",
    "Machine Learning",
    "AI",
    "HTML",
    "CSS",
    "Sass",
    "TailwindCSS",
    "Bootstrap",
    "Material UI",
    "Jest",
    "Testing",
    "Cypress",
    "Selenium",
];

/// City list for the location fallback when no labelled location line is
/// present. First match in the text wins; the entry is returned verbatim.
pub const KNOWN_CITIES: &[&str] = &[
    "Bangalore",
    "Bengaluru",
    "Mumbai",
    "Delhi",
    "Hyderabad",
    "Chennai",
    "Pune",
    "Kolkata",
    "Gurgaon",
    "Noida",
    "San Francisco",
    "New York",
    "Seattle",
    "Austin",
    "Boston",
    "Chicago",
    "London",
    "Berlin",
    "Amsterdam",
    "Toronto",
];

/// Job-title vocabulary for the current-title fallback scan.
pub const JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Software Developer",
    "Full Stack",
    "Frontend",
    "Backend",
    "DevOps",
    "Data Scientist",
    "Data Engineer",
    "Product Manager",
    "Project Manager",
    "Engineering Manager",
    "CTO",
    "VP",
    "Director",
    "Lead",
    "Architect",
    "Designer",
];
