//! Starter content for a fresh database.
//!
//! Each table is seeded only when it is empty, so running the seed twice is
//! harmless.

use sqlx::SqlitePool;

use super::{PricingRepository, ProjectRepository, RepositoryError};
use crate::models::{NewPricingPlan, NewProject};

/// What a seed run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Plans inserted (0 if the table already had rows).
    pub pricing_inserted: usize,
    /// Projects inserted (0 if the table already had rows).
    pub projects_inserted: usize,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// The three default pricing tiers.
#[must_use]
pub fn default_pricing_plans() -> Vec<NewPricingPlan> {
    vec![
        NewPricingPlan {
            name: "Starter".to_string(),
            price: "$999".to_string(),
            description: "Perfect for small businesses and startups.".to_string(),
            features: strings(&[
                "Custom Landing Page",
                "Mobile Responsive",
                "Contact Form",
                "Basic SEO",
                "1 Month Support",
            ]),
            popular: false,
            display_order: 1,
        },
        NewPricingPlan {
            name: "Professional".to_string(),
            price: "$2,499".to_string(),
            description: "For growing companies needing more features.".to_string(),
            features: strings(&[
                "Everything in Starter",
                "CMS Integration",
                "Blog Functionality",
                "Advanced Animations",
                "Analytics Setup",
                "3 Months Support",
            ]),
            popular: true,
            display_order: 2,
        },
        NewPricingPlan {
            name: "Enterprise".to_string(),
            price: "Custom".to_string(),
            description: "Tailored solutions for large organizations.".to_string(),
            features: strings(&[
                "Everything in Professional",
                "Custom Web App",
                "Database Integration",
                "API Development",
                "Priority Support",
                "SLA",
            ]),
            popular: false,
            display_order: 3,
        },
    ]
}

/// Three showcase projects.
#[must_use]
pub fn default_projects() -> Vec<NewProject> {
    let project = |title: &str, description: &str, photo: &str, slug: &str| NewProject {
        title: title.to_string(),
        description: description.to_string(),
        image_url: Some(format!(
            "https://images.unsplash.com/photo-{photo}?w=800&q=80"
        )),
        link: Some(format!("https://example.com/{slug}")),
    };

    vec![
        project(
            "E-Commerce Platform",
            "A modern e-commerce solution with real-time inventory management and seamless payment integration.",
            "1557821552-17105176677c",
            "ecommerce",
        ),
        project(
            "Fintech Dashboard",
            "Comprehensive financial analytics dashboard with interactive charts and reporting tools.",
            "1551288049-bebda4e38f71",
            "fintech",
        ),
        project(
            "Healthcare App",
            "Patient management system with appointment scheduling and telemedicine features.",
            "1576091160399-112ba8d25d1d",
            "healthcare",
        ),
    ]
}

/// Insert the default plans and projects into empty tables.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<SeedReport, RepositoryError> {
    let mut report = SeedReport::default();

    let pricing = PricingRepository::new(pool);
    if pricing.count().await? == 0 {
        for plan in default_pricing_plans() {
            pricing.create(&plan).await?;
            report.pricing_inserted += 1;
        }
    }

    let projects = ProjectRepository::new(pool);
    if projects.count().await? == 0 {
        for project in default_projects() {
            projects.create(&project).await?;
            report.projects_inserted += 1;
        }
    }

    Ok(report)
}
