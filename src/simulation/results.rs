use ndarray::Array2;

/// Trial-averaged probability that each initial-draw slot reaches each
/// round. Rows follow the draw's slot order; columns run from the first
/// round through `Runner_up` and `Champion` as cumulative reach indicators,
/// so a row is monotone non-increasing left to right.
#[derive(Debug, Clone)]
pub struct RoundProbabilityTable {
    players: Vec<String>,
    columns: Vec<String>,
    matrix: Array2<f64>,
}

impl RoundProbabilityTable {
    pub(crate) fn new(players: Vec<String>, columns: Vec<String>, matrix: Array2<f64>) -> Self {
        debug_assert_eq!(matrix.nrows(), players.len());
        debug_assert_eq!(matrix.ncols(), columns.len());
        Self {
            players,
            columns,
            matrix,
        }
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    fn slot_of(&self, player: &str) -> Option<usize> {
        self.players.iter().position(|name| name == player)
    }

    /// Probability that `player` reached the named column, `None` if either
    /// the player or the column is unknown.
    pub fn probability(&self, player: &str, column: &str) -> Option<f64> {
        let row = self.slot_of(player)?;
        let col = self.columns.iter().position(|name| name == column)?;
        Some(self.matrix[[row, col]])
    }

    pub fn champion_probability(&self, player: &str) -> Option<f64> {
        let row = self.slot_of(player)?;
        Some(self.matrix[[row, self.matrix.ncols() - 1]])
    }

    /// Rows in slot order, for CSV export.
    pub fn rows(&self) -> impl Iterator<Item = (&str, Vec<f64>)> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), self.matrix.row(i).to_vec()))
    }
}
