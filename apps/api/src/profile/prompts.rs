// Prompt templates for profile features.

/// Bio generation prompt. Replace `{name}`, `{affiliations}` and
/// `{interests}` before sending.
pub const BIO_PROMPT_TEMPLATE: &str = r#"Write a professional academic biography of about 80 to 100 words, in the third person, for the researcher below.
Mention their affiliation and their main research interests.

Researcher:
- Name: {name}
- Affiliation(s): {affiliations}
- Research interests: {interests}

Example of the expected style:
Dr. Jordan Hale is a researcher at the Northfield Institute of Technology, working across Climate Modelling, Numerical Methods and High-Performance Computing. Their work develops scalable solvers for coupled ocean-atmosphere simulations and applies them to regional climate projections. Dr. Hale is an active contributor to open scientific software and mentors early-career researchers in computational science.

Return only the new biography text, with no heading or commentary."#;

pub const INTERESTS_NOT_SPECIFIED: &str = "Not specified";
