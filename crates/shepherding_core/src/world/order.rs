use anyhow::ensure;

/// Order in which agents are updated within a tick.
///
/// Updates are sequential, so a sheep sees the already-moved positions of
/// every sheep before it in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOrder {
    pub sheep: Vec<usize>,
    pub shepherds: Vec<usize>,
}

impl UpdateOrder {
    /// Creation order: ascending ids.
    #[must_use]
    pub fn ascending(n_sheep: usize, n_shepherd: usize) -> Self {
        Self {
            sheep: (0..n_sheep).collect(),
            shepherds: (0..n_shepherd).collect(),
        }
    }

    #[must_use]
    pub fn new(sheep: Vec<usize>, shepherds: Vec<usize>) -> Self {
        Self { sheep, shepherds }
    }

    /// Both sequences must be permutations of `0..n`.
    pub fn validate(&self, n_sheep: usize, n_shepherd: usize) -> anyhow::Result<()> {
        ensure!(
            is_permutation(&self.sheep, n_sheep),
            "Sheep update order must be a permutation of 0..{n_sheep}"
        );
        ensure!(
            is_permutation(&self.shepherds, n_shepherd),
            "Shepherd update order must be a permutation of 0..{n_shepherd}"
        );
        Ok(())
    }
}

fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &i in order {
        if i >= n || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
