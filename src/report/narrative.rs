use chrono::Local;

use crate::assessment::{DimensionScores, ScoreResult, ValuationParameters, ValuationResult};
use crate::config::Profile;

/// Everything the narrative interpolates. All values are computed upstream;
/// the generator itself only formats.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub profile: Profile,
    pub scores: DimensionScores,
    pub score: ScoreResult,
    pub params: ValuationParameters,
    pub valuation: ValuationResult,
}

/// Assemble the narrative report as markdown, stamped with today's date.
///
/// Formatting convention: composite score and monetary figures use two
/// decimal places, dimension scores zero.
pub fn generate_narrative(ctx: &ReportContext) -> String {
    render_narrative(ctx, &Local::now().format("%Y-%m-%d").to_string())
}

fn render_narrative(ctx: &ReportContext, date: &str) -> String {
    let company = &ctx.profile.company;
    let score = ctx.score.score;

    format!(
        r#"---
**{company}: Quantified AI Exit Narrative Report**
Date: {date}
Prepared by: {analyst}, {firm}
---

**Executive Summary:**
{company} demonstrates a strong AI readiness for exit, with an overall **Exit-AI-R Score of {score:.2}**.
This robust capability is projected to contribute to a significant valuation uplift, transforming the
baseline sector EBITDA multiple of {baseline:.2}x to an estimated **{projected:.2}x**.
This uplift, driven by an AI Premium Coefficient of {coefficient:.2}, underscores the market's
recognition of {company}'s advanced AI integration and value creation potential.

**1. AI Exit-Readiness Assessment Details:**
*   **Overall Exit-AI-R Score**: {score:.2} (out of 100)
*   **Visible AI Capabilities Score**: {visible:.0}/100
*   **Documented AI Impact Score**: {documented:.0}/100
*   **Sustainable AI Capabilities Score**: {sustainable:.0}/100

**2. Projected Valuation Impact:**
*   **Baseline Sector EBITDA Multiple**: {baseline:.2}x
*   **AI Premium Coefficient**: {coefficient:.2} turns
*   **Projected EBITDA Multiple (with AI Premium)**: {projected:.2}x
*   **Implied Multiple Uplift**: {uplift:.2}x

**3. Strategic Narrative Points:**
*   **Strong Capability Foundation**: {company} has achieved an Exit-AI-R score of {score:.2},
    reflecting a deliberate and strategic build-out of AI capabilities that are poised for market
    recognition and premium valuation.
*   **Proven Value Creation**: With a **Documented AI Impact Score of {documented:.0}**, {company}
    provides auditable evidence of financial return on AI investments, proving that its AI is a
    profit-center, not just a cost-center. This directly translates into higher, quantifiable value
    for acquirers.
*   **Market Differentiation & Visibility**: A **Visible AI Capabilities Score of {visible:.0}**
    ensures that potential buyers can clearly perceive how {company}'s AI differentiates its
    products and services, creating a defensible competitive moat and immediate market appeal.
*   **Long-term & Scalable Impact**: The **Sustainable AI Capabilities Score of {sustainable:.0}**
    assures buyers of deep integration, robust governance, a strong talent base, and scalable
    processes. This signifies low integration risk and enduring AI-driven value post-acquisition.

---
"#,
        company = company,
        date = date,
        analyst = ctx.profile.analyst,
        firm = ctx.profile.firm,
        score = score,
        visible = ctx.scores.visible,
        documented = ctx.scores.documented,
        sustainable = ctx.scores.sustainable,
        baseline = ctx.valuation.baseline,
        projected = ctx.valuation.projected,
        coefficient = ctx.params.premium_coefficient,
        uplift = ctx.valuation.uplift(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{compute_score, project_valuation, Weights};

    fn sample_context() -> ReportContext {
        let scores = DimensionScores::default();
        let score = compute_score(&scores, &Weights::default());
        let params = ValuationParameters::default();
        let valuation = project_valuation(score.score, &params);
        ReportContext {
            profile: Profile::default(),
            scores,
            score,
            params,
            valuation,
        }
    }

    #[test]
    fn test_narrative_header_and_sections() {
        let text = render_narrative(&sample_context(), "2026-08-06");
        assert!(text.contains("**InnovateTech: Quantified AI Exit Narrative Report**"));
        assert!(text.contains("Date: 2026-08-06"));
        assert!(text.contains("Prepared by: Jane Doe, Alpha Capital"));
        assert!(text.contains("**1. AI Exit-Readiness Assessment Details:**"));
        assert!(text.contains("**2. Projected Valuation Impact:**"));
        assert!(text.contains("**3. Strategic Narrative Points:**"));
    }

    #[test]
    fn test_narrative_two_decimal_composite_and_multiples() {
        let text = render_narrative(&sample_context(), "2026-08-06");
        assert!(text.contains("Exit-AI-R Score of 70.25"));
        assert!(text.contains("**Baseline Sector EBITDA Multiple**: 7.00x"));
        assert!(text.contains("AI Premium Coefficient of 2.00"));
    }

    #[test]
    fn test_narrative_zero_decimal_dimensions() {
        let text = render_narrative(&sample_context(), "2026-08-06");
        assert!(text.contains("**Visible AI Capabilities Score**: 75/100"));
        assert!(text.contains("**Documented AI Impact Score**: 60/100"));
        assert!(text.contains("**Sustainable AI Capabilities Score**: 80/100"));
        assert!(!text.contains("75.00/100"));
    }

    #[test]
    fn test_narrative_uplift_is_difference() {
        let mut ctx = sample_context();
        ctx.valuation = project_valuation(50.0, &ctx.params);
        let text = render_narrative(&ctx, "2026-08-06");
        // 7.0 + 2.0 * 50 / 100 = 8.0, uplift 1.0
        assert!(text.contains("**Projected EBITDA Multiple (with AI Premium)**: 8.00x"));
        assert!(text.contains("**Implied Multiple Uplift**: 1.00x"));
    }

    #[test]
    fn test_narrative_uses_profile_names() {
        let mut ctx = sample_context();
        ctx.profile = Profile {
            analyst: "Alex Kim".to_string(),
            firm: "Beta Partners".to_string(),
            company: "Acme AI".to_string(),
        };
        let text = render_narrative(&ctx, "2026-08-06");
        assert!(text.contains("Prepared by: Alex Kim, Beta Partners"));
        assert!(text.contains("Acme AI demonstrates"));
        assert!(!text.contains("InnovateTech"));
    }

    #[test]
    fn test_generate_narrative_stamps_a_date() {
        let text = generate_narrative(&sample_context());
        let date_line = text
            .lines()
            .find(|l| l.starts_with("Date: "))
            .expect("date line present");
        // YYYY-MM-DD
        assert_eq!(date_line.len(), "Date: 2026-08-06".len());
    }
}
