/// Asserts that the sheep with the given id is in the given state.
#[macro_export]
macro_rules! assert_sheep_state {
    ($world:expr, $id:expr, $state:expr) => {
        let state = $world.state_of($id).expect("Sheep not found in world");
        assert_eq!(state, $state, "Sheep {} has state {:?}", $id, state);
    };
}

/// Asserts that every agent orientation is finite and inside `(-π, π]`.
#[macro_export]
macro_rules! assert_orientations_canonical {
    ($world:expr) => {
        for s in &$world.sheep {
            let o = s.body.orientation;
            assert!(
                o.is_finite() && o > -std::f64::consts::PI && o <= std::f64::consts::PI,
                "Sheep {} orientation {} out of range",
                s.id,
                o
            );
        }
        for h in &$world.shepherds {
            let o = h.body.orientation;
            assert!(
                o.is_finite() && o > -std::f64::consts::PI && o <= std::f64::consts::PI,
                "Shepherd {} orientation {} out of range",
                h.id,
                o
            );
        }
    };
}
