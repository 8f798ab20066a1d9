//! Interactive prompts on the terminal.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

use crate::error::{FoundryError, Result};

use super::Prompt;

fn map_dialoguer_err(e: dialoguer::Error) -> FoundryError {
    FoundryError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Ask `prompt` on `term` and return the answer.
///
/// Secret prompts never show a default, since it would be echoed.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    let theme = prompt_theme();

    if prompt.secret {
        return Password::with_theme(&theme)
            .with_prompt(&prompt.question)
            .interact_on(term)
            .map_err(map_dialoguer_err);
    }

    let mut input = Input::<String>::with_theme(&theme).with_prompt(&prompt.question);
    if let Some(default) = &prompt.default {
        input = input.default(default.clone());
    }
    input.interact_on(term).map_err(map_dialoguer_err)
}
