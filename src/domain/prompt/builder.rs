//! System prompt construction from a farmer's profile.

use crate::domain::profile::Profile;

/// Fixed instructions appended after the farm description.
const IRRIGATION_INSTRUCTIONS: &str = r#"Answer the farmer's question using the farm details above.
When the question is about watering or irrigation, give a recommendation for each crop listed, in the same order, using exactly this format:

<crop name>
- Frequency: <how often to water>
- Quantity: <how much water per acre each time>
- Notes: <anything else the farmer should know>

Keep the answer short and practical; it will be read on a phone."#;

/// Renders the system instruction for a registered user.
///
/// The output depends only on the profile: crops are listed in the order they
/// were registered, one per line, so the same profile always yields the same
/// bytes.
pub fn build_system_prompt(profile: &Profile) -> String {
    let mut prompt = format!(
        "You are an agricultural assistant for {}, who runs a farm in {}.\n\
The farm grows the following crops:\n",
        profile.user.name, profile.farm.location
    );
    for crop in &profile.crops {
        prompt.push_str(&format!("- {}: {} acres\n", crop.name, crop.size));
    }
    prompt.push('\n');
    prompt.push_str(IRRIGATION_INSTRUCTIONS);

    prompt
}
