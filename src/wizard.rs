//! Three-screen wizard flow: welcome → input → result.
//!
//! The state machine is pure; the binary owns the terminal loop. Submitting
//! with any empty field routes to the result screen with a validation
//! message and never touches the classifier.

use crate::dataset::UserInput;
use crate::error::Result;
use crate::model::{Recommendation, RemedyModel};

/// Shown on the result screen when any input field is left empty.
pub const VALIDATION_MESSAGE: &str = "Please enter all fields.";

/// Text banner standing in for the welcome/input screen artwork.
pub const BANNER: &str = r"
   🌿  Herbal Care  🌿
  ---------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Welcome,
    Input,
    Result,
}

/// What the result screen has to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// At least one field was empty; no prediction was made.
    Incomplete,
    Recommended(Recommendation),
}

/// The wizard's whole state: current screen, the three raw input strings,
/// and the last computed outcome. Inputs survive the back transition.
#[derive(Debug, Default)]
pub struct Wizard {
    screen: Screen,
    pub condition: String,
    pub age_group: String,
    pub dietary_preferences: String,
    outcome: Option<Outcome>,
}

impl Wizard {
    pub fn new() -> Self {
        Wizard::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Welcome → input.
    pub fn start(&mut self) {
        if self.screen == Screen::Welcome {
            self.screen = Screen::Input;
        }
    }

    /// Input → result, guarded on all three raw fields being non-empty.
    pub fn submit(&mut self, model: &RemedyModel) -> Result<()> {
        self.submit_with(|input| model.recommend(input))
    }

    /// Same as [`Wizard::submit`] with the recommender injected, so tests
    /// can observe whether it runs at all.
    pub fn submit_with<F>(&mut self, recommend: F) -> Result<()>
    where
        F: FnOnce(&UserInput) -> Result<Recommendation>,
    {
        if self.screen != Screen::Input {
            return Ok(());
        }

        if self.condition.is_empty() || self.age_group.is_empty() || self.dietary_preferences.is_empty()
        {
            self.outcome = Some(Outcome::Incomplete);
            self.screen = Screen::Result;
            return Ok(());
        }

        let input = UserInput::new(&self.condition, &self.age_group, &self.dietary_preferences);
        let recommendation = recommend(&input)?;
        self.outcome = Some(Outcome::Recommended(recommendation));
        self.screen = Screen::Result;
        Ok(())
    }

    /// Result → input, keeping the entered values.
    pub fn back(&mut self) {
        if self.screen == Screen::Result {
            self.screen = Screen::Input;
        }
    }
}

/// Renders the result screen body.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Incomplete => VALIDATION_MESSAGE.to_string(),
        Outcome::Recommended(rec) => {
            let r = &rec.record;
            let mut text = format!(
                "Recommended Remedy: {}\n\nIngredients: {}\n\nRecipe: {}\n\nDosage: {}\n\nCautions: {}\n\nContraindications: {}",
                r.remedy_name, r.ingredients, r.recipe, r.dosage, r.cautions, r.contraindications
            );
            for unseen in &rec.unseen {
                text.push_str(&format!(
                    "\n\nNote: unrecognized {} value \"{}\".",
                    unseen.column, unseen.value
                ));
            }
            text
        }
    }
}
