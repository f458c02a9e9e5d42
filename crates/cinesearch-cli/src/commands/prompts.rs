use color_eyre::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (hidden input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Prompt for a star rating, re-asking until it is a number from 1 to 5
pub fn prompt_rating(prompt: &str) -> Result<u8> {
    Input::<u8>::new()
        .with_prompt(prompt)
        .validate_with(|value: &u8| -> std::result::Result<(), &str> {
            if (1..=5).contains(value) {
                Ok(())
            } else {
                Err("Rating must be between 1 and 5")
            }
        })
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read rating: {}", e))
}
