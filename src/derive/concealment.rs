use tracing::debug;

use crate::error::IResult;
use crate::modifiers::ModifierKind;
use crate::units::Km;

use super::{BuildContext, round_to};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcealmentStats {
    pub sea_detection: Km,
    pub air_detection: Km,
    pub smoke_firing_detection: Option<Km>,
}

pub fn derive(ctx: &BuildContext<'_>) -> IResult<Option<ConcealmentStats>> {
    let Some(hull) = ctx.configuration.hull()? else {
        return Ok(None);
    };
    debug!(ship = %ctx.ship().name, "deriving concealment");

    let modifiers = ctx.modifiers;
    let sea = hull.sea_detection * modifiers.product(ModifierKind::Visibility);
    let air = hull.air_detection * modifiers.product(ModifierKind::VisibilityByPlane);

    Ok(Some(ConcealmentStats {
        sea_detection: Km::new(round_to(sea.value(), 2)),
        air_detection: Km::new(round_to(air.value(), 2)),
        smoke_firing_detection: hull.smoke_firing_detection,
    }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::derive::fixtures;
    use crate::modifiers::ModifierSet;

    #[test]
    fn visibility_keys_stay_apart() {
        let ship = fixtures::cruiser();
        let data = fixtures::data();
        let modifiers: ModifierSet = [
            ("visibilityFactor", 0.9),
            ("visibilityFactorByPlane", 0.8),
            ("torpedoVisibilityFactor", 0.5),
            ("planeVisibilityFactor", 0.5),
        ]
        .into_iter()
        .collect();
        let ctx = fixtures::context(&ship, &data, &modifiers);

        let stats = derive(&ctx).unwrap().unwrap();
        assert_eq!(stats.sea_detection, Km::new(11.7));
        assert_eq!(stats.air_detection, Km::new(6.4));
        assert_eq!(stats.smoke_firing_detection, Some(Km::new(6.0)));
    }
}
