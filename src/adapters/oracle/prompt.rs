//! Prompt rendering and response parsing for pair judgment.

use std::fmt::Write;

use crate::domain::action::Action;
use crate::domain::combination::PreferenceLabel;
use crate::domain::profile::UserProfile;
use crate::ports::OracleError;

pub(super) const SYSTEM_PROMPT: &str = "\
You are a climate action expert helping prioritize carbon reduction actions for individuals. \
Given two climate actions and a user profile, determine which action would have MORE OVERALL IMPACT for this specific user.

Consider ALL of these factors in your decision:

1. CO2 reduction potential: how much greenhouse gas does each action reduce? Weight this heavily.
2. Relevance to the user's lifestyle: does the action address the user's primary emission sources? \
A transport action matters more for someone who drives daily. A diet action matters more for a heavy meat eater. \
An energy action matters more for someone on grid electricity.
3. Cost relative to income: expensive actions are less feasible for low-income users. \
Actions with net savings are more attractive for budget-conscious users.
4. Speed of action: \"Emergency Brake\" actions have immediate atmospheric impact. \
\"Gradual\" actions take time. \"Delayed\" actions take even longer. Prefer faster actions when impact is similar.
5. Co-benefits: environment benefits (air quality, water quality, nature protection) \
and human wellbeing benefits (health, income, food security, equality) relevant to the user's context.
6. Climate adaptation: if the user lives in an area prone to floods, droughts, or extreme heat, \
actions with matching adaptation benefits are more valuable.
7. Feasibility: is this action realistic for the user's situation? \
Solar panels matter less for apartment dwellers. Public transit matters less in cities without infrastructure.

You must choose one action. No ties allowed.

Respond with a JSON object {\"score\": 1} if Action A is better or {\"score\": 0} if Action B is better.";

/// Renders the user message for one judgment.
pub(super) fn render_user_prompt(
    action_a: &Action,
    action_b: &Action,
    profile: &UserProfile,
) -> String {
    let mut prompt = String::from(
        "Compare these two climate actions for this user and pick which has more overall impact.\n\n",
    );

    let _ = writeln!(prompt, "USER PROFILE:");
    let _ = writeln!(prompt, "- City: {}", profile.city);
    let _ = writeln!(prompt, "- Climate zone: {}", profile.climate_zone);
    let _ = writeln!(prompt, "- Primary transport: {}", profile.primary_transport);
    let _ = writeln!(prompt, "- Diet: {}", profile.diet);
    let _ = writeln!(prompt, "- Housing: {}", profile.housing_type);
    let _ = writeln!(prompt, "- Energy source: {}", profile.energy_source);
    let _ = writeln!(prompt, "- Income level: {}\n", profile.income_level);

    render_action(&mut prompt, "ACTION A", action_a);
    render_action(&mut prompt, "ACTION B", action_b);

    prompt.push_str("Which action has more overall impact for this user? You must pick A or B.");
    prompt
}

fn render_action(prompt: &mut String, heading: &str, action: &Action) {
    let cost = action
        .cost
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let _ = writeln!(prompt, "{}:", heading);
    let _ = writeln!(prompt, "- Solution: {}", action.solution);
    let _ = writeln!(prompt, "- Action: {}", action.action);
    let _ = writeln!(prompt, "- Sector: {}", text(&action.sector));
    let _ = writeln!(prompt, "- GHG Impact (Gt CO2): {}", text(&action.ghg_impact));
    let _ = writeln!(prompt, "- Cost ($/t CO2): {}", cost);
    let _ = writeln!(prompt, "- Speed of action: {}", text(&action.speed_of_action));
    let _ = writeln!(prompt, "- Mode: {}", text(&action.mode));
    let _ = writeln!(
        prompt,
        "- Climate pollutants: {}",
        text(&action.climate_pollutants_mitigated)
    );
    let _ = writeln!(
        prompt,
        "- Adaptation benefits: {}",
        text(&action.climate_adaptation_benefits)
    );
    let _ = writeln!(
        prompt,
        "- Environment benefits: {}",
        text(&action.environment_benefits)
    );
    let _ = writeln!(
        prompt,
        "- Wellbeing benefits: {}\n",
        text(&action.human_wellbeing_benefits)
    );
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}

/// Removes a surrounding markdown code fence, if any.
pub(crate) fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    // Drop the info string ("json") on the opening fence line.
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

/// Parses `{"score": 0|1}`. Anything else is a malformed response.
pub(super) fn parse_score(content: &str) -> Result<PreferenceLabel, OracleError> {
    let body = strip_code_fence(content);
    let parsed: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| OracleError::malformed(format!("not JSON ({}): {}", e, body)))?;

    let score = parsed
        .as_object()
        .ok_or_else(|| OracleError::malformed(format!("expected an object, got {}", parsed)))?
        .get("score")
        .ok_or_else(|| OracleError::malformed("missing \"score\" field"))?;

    let value = score
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| OracleError::malformed(format!("score must be 0 or 1, got {}", score)))?;

    PreferenceLabel::from_u8(value).map_err(|e| OracleError::malformed(e.to_string()))
}
