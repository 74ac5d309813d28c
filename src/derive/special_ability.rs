use tracing::debug;

use crate::error::IResult;
use crate::modifiers::{FoldOp, ModifierEffect, ModifierKind};

use super::{BuildContext, round_to};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAbilityStats {
    pub name: String,
    /// Seconds.
    pub duration: f64,
    pub duration_raw: f64,
    pub required_progress: f64,
    pub decrement_delay: f64,
    pub decrement_count: f64,
    pub decrement_period: f64,
    /// Effects applied while the ability is active.
    pub modifiers: Vec<ModifierEffect>,
}

pub fn derive(ctx: &BuildContext<'_>) -> IResult<Option<SpecialAbilityStats>> {
    let Some(ability) = &ctx.ship().special_ability else {
        return Ok(None);
    };
    debug!(ship = %ctx.ship().name, ability = %ability.name, "deriving special ability");

    let duration = ctx
        .modifiers
        .fold(ModifierKind::SpecialAbilityDuration, ability.duration, FoldOp::Multiply);

    Ok(Some(SpecialAbilityStats {
        name: ability.name.clone(),
        duration: round_to(duration, 1),
        duration_raw: duration,
        required_progress: ability.required_progress,
        decrement_delay: ability.decrement_delay,
        decrement_count: ability.decrement_count,
        decrement_period: ability.decrement_period,
        modifiers: ability.modifiers.clone(),
    }))
}
