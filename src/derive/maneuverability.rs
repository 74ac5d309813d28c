use tracing::debug;

use crate::error::IResult;
use crate::modifiers::{FoldOp, ModifierKind};
use crate::units::Meters;

use super::{BuildContext, round_to};

/// Speed and handling. Acceleration is not modelled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManeuverabilityStats {
    /// Knots.
    pub max_speed: f64,
    pub max_speed_raw: f64,
    pub rudder_shift_time: f64,
    pub turning_radius: Meters,
}

pub fn derive(ctx: &BuildContext<'_>) -> IResult<Option<ManeuverabilityStats>> {
    let Some(hull) = ctx.configuration.hull()? else {
        return Ok(None);
    };
    debug!(ship = %ctx.ship().name, "deriving maneuverability");

    let engine_coef = ctx.configuration.engine()?.map(|e| e.speed_coef).unwrap_or_default();
    let modifiers = ctx.modifiers;
    let max_speed = modifiers.fold(
        ModifierKind::SpeedCoef,
        hull.max_speed * (1.0 + engine_coef),
        FoldOp::Multiply,
    );
    let rudder = modifiers.fold(ModifierKind::RudderTime, hull.rudder_time, FoldOp::Multiply);

    Ok(Some(ManeuverabilityStats {
        max_speed: round_to(max_speed, 1),
        max_speed_raw: max_speed,
        rudder_shift_time: round_to(rudder, 2),
        turning_radius: hull.turning_radius,
    }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::derive::fixtures;
    use crate::modifiers::ModifierSet;

    #[test]
    fn engine_and_modifiers() {
        let ship = fixtures::cruiser();
        let data = fixtures::data();
        let modifiers: ModifierSet = [("speedCoef", 1.05), ("SGRudderTime", 0.8)].into_iter().collect();
        let ctx = fixtures::context(&ship, &data, &modifiers);

        let stats = derive(&ctx).unwrap().unwrap();
        // 32 kn hull, 5% engine bonus, 5% speed flag
        assert!((stats.max_speed_raw - 32.0 * 1.05 * 1.05).abs() < 1e-9);
        assert_eq!(stats.max_speed, 35.3);
        assert_eq!(stats.rudder_shift_time, 8.0);
        assert_eq!(stats.turning_radius, Meters::new(780.0));
    }
}
