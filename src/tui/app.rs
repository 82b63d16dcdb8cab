use std::time::Instant;

use crate::assessment::{
    compute_score, project_valuation, DimensionScores, ScoreResult, ValuationParameters,
    ValuationResult, WeightNotice, Weights, BASELINE_MAX, BASELINE_MIN, COEFFICIENT_MAX,
    COEFFICIENT_MIN, MULTIPLE_STEP, SCORE_MAX, SCORE_MIN, SCORE_STEP, WEIGHT_MAX, WEIGHT_MIN,
    WEIGHT_STEP,
};
use crate::buffered_eprintln;
use crate::config::Profile;
use crate::report::{default_report_path, generate_narrative, save_report, ReportContext};

/// The assessment walkthrough pages, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Profile,
    Dimensions,
    Weights,
    Valuation,
    Narrative,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Profile,
        Page::Dimensions,
        Page::Weights,
        Page::Valuation,
        Page::Narrative,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Profile => "Profile",
            Page::Dimensions => "Dimensions",
            Page::Weights => "Weights",
            Page::Valuation => "Valuation",
            Page::Narrative => "Narrative",
        }
    }

    pub fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn previous(&self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

/// Identity of an editable input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Analyst,
    Firm,
    Company,
    Visible,
    Documented,
    Sustainable,
    WeightVisible,
    WeightDocumented,
    WeightSustainable,
    BaselineMultiple,
    PremiumCoefficient,
}

impl FieldId {
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Analyst => "Analyst name",
            FieldId::Firm => "Firm name",
            FieldId::Company => "Company name",
            FieldId::Visible => "Visible AI capabilities (0-100)",
            FieldId::Documented => "Documented AI impact (0-100)",
            FieldId::Sustainable => "Sustainable AI capabilities (0-100)",
            FieldId::WeightVisible => "Weight for Visible (0-1)",
            FieldId::WeightDocumented => "Weight for Documented (0-1)",
            FieldId::WeightSustainable => "Weight for Sustainable (0-1)",
            FieldId::BaselineMultiple => "Baseline EBITDA multiple",
            FieldId::PremiumCoefficient => "AI premium coefficient",
        }
    }

    /// (min, max, step) for numeric fields; None for text fields.
    pub fn numeric_spec(&self) -> Option<(f64, f64, f64)> {
        match self {
            FieldId::Analyst | FieldId::Firm | FieldId::Company => None,
            FieldId::Visible | FieldId::Documented | FieldId::Sustainable => {
                Some((SCORE_MIN, SCORE_MAX, SCORE_STEP))
            }
            FieldId::WeightVisible | FieldId::WeightDocumented | FieldId::WeightSustainable => {
                Some((WEIGHT_MIN, WEIGHT_MAX, WEIGHT_STEP))
            }
            FieldId::BaselineMultiple => Some((BASELINE_MIN, BASELINE_MAX, MULTIPLE_STEP)),
            FieldId::PremiumCoefficient => Some((COEFFICIENT_MIN, COEFFICIENT_MAX, MULTIPLE_STEP)),
        }
    }
}

/// Fields shown on each page, in cursor order.
pub fn fields_for(page: Page) -> &'static [FieldId] {
    match page {
        Page::Profile => &[FieldId::Analyst, FieldId::Firm, FieldId::Company],
        Page::Dimensions => &[FieldId::Visible, FieldId::Documented, FieldId::Sustainable],
        Page::Weights => &[
            FieldId::WeightVisible,
            FieldId::WeightDocumented,
            FieldId::WeightSustainable,
        ],
        Page::Valuation => &[FieldId::BaselineMultiple, FieldId::PremiumCoefficient],
        Page::Narrative => &[],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Help,
}

pub struct App {
    // Current inputs (session state; the computational core never sees
    // anything but explicit arguments)
    pub profile: Profile,
    pub scores: DimensionScores,
    pub weights: Weights,
    pub params: ValuationParameters,

    // Staged results. None means "not computed yet" (or invalidated by an
    // upstream edit); pages downstream of a None render a gating notice.
    pub score: Option<ScoreResult>,
    pub valuation: Option<ValuationResult>,
    pub narrative: Option<String>,

    pub page: Page,
    pub field_cursor: usize,
    pub input_mode: InputMode,
    pub edit_buffer: String,
    pub narrative_scroll: u16,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub verbose: bool,

    // Constructor-time values restored by reset
    initial_profile: Profile,
    initial_scores: DimensionScores,
    initial_weights: Weights,
    initial_params: ValuationParameters,
}

impl App {
    pub fn new(
        profile: Profile,
        scores: DimensionScores,
        weights: Weights,
        params: ValuationParameters,
        verbose: bool,
    ) -> Self {
        Self {
            initial_profile: profile.clone(),
            initial_scores: scores,
            initial_weights: weights,
            initial_params: params,
            profile,
            scores,
            weights,
            params,
            score: None,
            valuation: None,
            narrative: None,
            page: Page::Profile,
            field_cursor: 0,
            input_mode: InputMode::Normal,
            edit_buffer: String::new(),
            narrative_scroll: 0,
            flash_message: None,
            should_quit: false,
            verbose,
        }
    }

    pub fn fields(&self) -> &'static [FieldId] {
        fields_for(self.page)
    }

    pub fn current_field(&self) -> Option<FieldId> {
        self.fields().get(self.field_cursor).copied()
    }

    pub fn next_field(&mut self) {
        let count = self.fields().len();
        if count == 0 {
            return;
        }
        self.field_cursor = if self.field_cursor >= count - 1 {
            0
        } else {
            self.field_cursor + 1
        };
    }

    pub fn previous_field(&mut self) {
        let count = self.fields().len();
        if count == 0 {
            return;
        }
        self.field_cursor = if self.field_cursor == 0 {
            count - 1
        } else {
            self.field_cursor - 1
        };
    }

    pub fn goto_page(&mut self, page: Page) {
        self.page = page;
        self.field_cursor = 0;
        self.narrative_scroll = 0;
    }

    pub fn next_page(&mut self) {
        self.goto_page(self.page.next());
    }

    pub fn previous_page(&mut self) {
        self.goto_page(self.page.previous());
    }

    /// Display string for a field value. Dimension scores render with zero
    /// decimals, weights with two, multiples with one (matching their
    /// entry steps).
    pub fn field_value(&self, id: FieldId) -> String {
        match id {
            FieldId::Analyst => self.profile.analyst.clone(),
            FieldId::Firm => self.profile.firm.clone(),
            FieldId::Company => self.profile.company.clone(),
            FieldId::Visible => format!("{:.0}", self.scores.visible),
            FieldId::Documented => format!("{:.0}", self.scores.documented),
            FieldId::Sustainable => format!("{:.0}", self.scores.sustainable),
            FieldId::WeightVisible => format!("{:.2}", self.weights.visible),
            FieldId::WeightDocumented => format!("{:.2}", self.weights.documented),
            FieldId::WeightSustainable => format!("{:.2}", self.weights.sustainable),
            FieldId::BaselineMultiple => format!("{:.1}", self.params.baseline_multiple),
            FieldId::PremiumCoefficient => format!("{:.1}", self.params.premium_coefficient),
        }
    }

    fn get_numeric(&self, id: FieldId) -> f64 {
        match id {
            FieldId::Visible => self.scores.visible,
            FieldId::Documented => self.scores.documented,
            FieldId::Sustainable => self.scores.sustainable,
            FieldId::WeightVisible => self.weights.visible,
            FieldId::WeightDocumented => self.weights.documented,
            FieldId::WeightSustainable => self.weights.sustainable,
            FieldId::BaselineMultiple => self.params.baseline_multiple,
            FieldId::PremiumCoefficient => self.params.premium_coefficient,
            _ => 0.0,
        }
    }

    fn set_numeric(&mut self, id: FieldId, value: f64) {
        match id {
            FieldId::Visible => self.scores.visible = value,
            FieldId::Documented => self.scores.documented = value,
            FieldId::Sustainable => self.scores.sustainable = value,
            FieldId::WeightVisible => self.weights.visible = value,
            FieldId::WeightDocumented => self.weights.documented = value,
            FieldId::WeightSustainable => self.weights.sustainable = value,
            FieldId::BaselineMultiple => self.params.baseline_multiple = value,
            FieldId::PremiumCoefficient => self.params.premium_coefficient = value,
            _ => {}
        }
        self.invalidate_from(id);
    }

    fn set_text(&mut self, id: FieldId, value: String) {
        match id {
            FieldId::Analyst => self.profile.analyst = value,
            FieldId::Firm => self.profile.firm = value,
            FieldId::Company => self.profile.company = value,
            _ => {}
        }
        self.invalidate_from(id);
    }

    /// Drop results downstream of an edited field so stale figures are
    /// never rendered.
    fn invalidate_from(&mut self, id: FieldId) {
        match id {
            FieldId::Analyst | FieldId::Firm | FieldId::Company => {
                self.narrative = None;
            }
            FieldId::Visible
            | FieldId::Documented
            | FieldId::Sustainable
            | FieldId::WeightVisible
            | FieldId::WeightDocumented
            | FieldId::WeightSustainable => {
                self.score = None;
                self.valuation = None;
                self.narrative = None;
            }
            FieldId::BaselineMultiple | FieldId::PremiumCoefficient => {
                self.valuation = None;
                self.narrative = None;
            }
        }
    }

    /// Step the selected numeric field by `steps` increments, snapped to
    /// the step grid and clamped to the entry range. Text fields ignore
    /// adjustment.
    pub fn adjust_current(&mut self, steps: f64) {
        let Some(id) = self.current_field() else {
            return;
        };
        let Some((min, max, step)) = id.numeric_spec() else {
            return;
        };
        let current = self.get_numeric(id);
        let stepped = ((current / step).round() + steps) * step;
        let clamped = stepped.clamp(min, max);
        if clamped != current {
            self.set_numeric(id, clamped);
        }
    }

    /// Start editing the selected field, seeding the buffer with the
    /// current value.
    pub fn start_edit(&mut self) {
        if let Some(id) = self.current_field() {
            self.edit_buffer = self.field_value(id);
            self.input_mode = InputMode::Editing;
        }
    }

    /// Commit the edit buffer into the selected field. Numeric values
    /// must parse and fall within the field's entry range; failures flash
    /// and leave the field unchanged.
    pub fn commit_edit(&mut self) {
        let Some(id) = self.current_field() else {
            self.input_mode = InputMode::Normal;
            return;
        };

        let input = std::mem::take(&mut self.edit_buffer);
        self.input_mode = InputMode::Normal;

        match id.numeric_spec() {
            None => {
                let trimmed = input.trim().to_string();
                if trimmed.is_empty() {
                    self.show_flash(format!("{} cannot be empty", id.label()));
                    return;
                }
                self.set_text(id, trimmed);
            }
            Some((min, max, _)) => match input.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= min && v <= max => self.set_numeric(id, v),
                Ok(_) => {
                    self.show_flash(format!("{}: must be within {}-{}", id.label(), min, max));
                }
                Err(_) => {
                    self.show_flash(format!("Invalid number: '{}'", input.trim()));
                }
            },
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Compute the composite readiness score from the current inputs.
    pub fn compute_score_now(&mut self) {
        let result = compute_score(&self.scores, &self.weights);

        let flash = match result.notice {
            None => format!("Exit-AI-R Score: {:.2}", result.score),
            Some(WeightNotice::Normalized { original_sum }) => format!(
                "Exit-AI-R Score: {:.2} (weights sum {:.2}, normalized to 1.00)",
                result.score, original_sum
            ),
            Some(WeightNotice::ZeroSum) => {
                "Error: weights sum to zero and cannot be normalized; score is 0.00".to_string()
            }
        };

        if self.verbose {
            buffered_eprintln!(
                "computed score {:.4} with weights {:.4}/{:.4}/{:.4}",
                result.score,
                result.weights_used.visible,
                result.weights_used.documented,
                result.weights_used.sustainable
            );
        }

        self.score = Some(result);
        self.valuation = None;
        self.narrative = None;
        self.show_flash(flash);
    }

    /// Project the valuation multiple. Requires a computed score.
    pub fn project_now(&mut self) {
        let Some(score) = self.score else {
            self.show_flash("Error: compute the Exit-AI-R score first (Weights page, c)".to_string());
            return;
        };
        let result = project_valuation(score.score, &self.params);
        self.valuation = Some(result);
        self.narrative = None;
        self.show_flash(format!(
            "Projected multiple: {:.2}x (baseline {:.2}x)",
            result.projected, result.baseline
        ));
    }

    /// Assemble the narrative report. Requires a completed projection.
    pub fn generate_now(&mut self) {
        let (Some(score), Some(valuation)) = (self.score, self.valuation) else {
            self.show_flash("Error: project the valuation first (Valuation page, p)".to_string());
            return;
        };
        let ctx = ReportContext {
            profile: self.profile.clone(),
            scores: self.scores,
            score,
            params: self.params,
            valuation,
        };
        self.narrative = Some(generate_narrative(&ctx));
        self.narrative_scroll = 0;
        self.show_flash("Narrative generated (w to write to file)".to_string());
    }

    /// Write the generated narrative to the default report path.
    pub fn export_now(&mut self) {
        let Some(ref narrative) = self.narrative else {
            self.show_flash("Error: generate the narrative first (g)".to_string());
            return;
        };
        let path = default_report_path(&self.profile.company);
        match save_report(&path, narrative) {
            Ok(()) => {
                if self.verbose {
                    buffered_eprintln!("report written to {}", path.display());
                }
                self.show_flash(format!("Report written to {}", path.display()));
            }
            Err(e) => self.show_flash(format!("Failed to write report: {}", e)),
        }
    }

    /// Restore every input to its constructor-time value and clear all
    /// results (the reset action of the original workflow).
    pub fn reset(&mut self) {
        self.profile = self.initial_profile.clone();
        self.scores = self.initial_scores;
        self.weights = self.initial_weights;
        self.params = self.initial_params;
        self.score = None;
        self.valuation = None;
        self.narrative = None;
        self.field_cursor = 0;
        self.narrative_scroll = 0;
        self.show_flash("Session reset".to_string());
    }

    pub fn scroll_narrative(&mut self, delta: i32) {
        if delta < 0 {
            self.narrative_scroll = self.narrative_scroll.saturating_sub(delta.unsigned_abs() as u16);
        } else {
            self.narrative_scroll = self.narrative_scroll.saturating_add(delta as u16);
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
