//! Reference vocabulary of technology names matched in job descriptions.

pub const REFERENCE_SKILLS: [&str; 61] = [
    // Languages
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Go",
    "Rust",
    "PHP",
    "Ruby",
    // Frontend frameworks
    "React",
    "Vue",
    "Angular",
    "Next.js",
    "Svelte",
    // Backend frameworks
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring Boot",
    // Databases
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "DynamoDB",
    // Cloud
    "AWS",
    "Azure",
    "GCP",
    "Firebase",
    "Heroku",
    // Delivery
    "Docker",
    "Kubernetes",
    "CI/CD",
    "Jenkins",
    "GitHub Actions",
    // Practices
    "Git",
    "Agile",
    "Scrum",
    "REST API",
    "GraphQL",
    "Microservices",
    // Styling
    "HTML",
    "CSS",
    "Sass",
    "Tailwind",
    "Bootstrap",
    // Systems
    "SQL",
    "NoSQL",
    "Linux",
    "Bash",
    "PowerShell",
    // Testing
    "Jest",
    "Mocha",
    "Pytest",
    "JUnit",
    "Testing",
    // Tooling
    "Webpack",
    "Vite",
    "Babel",
    "npm",
    "yarn",
];
