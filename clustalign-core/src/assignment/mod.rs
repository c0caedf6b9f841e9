//! Exact maximum-weight bipartite assignment.
//!
//! Implements the shortest augmenting path form of the Hungarian method with
//! dual potentials on a square table, padding the shorter side with
//! zero-weight dummy rows or columns. Weights are item counts, so the solver
//! works on integer costs and the optimum is exact.
//!
//! The optimal potentials single out the tight cells: every optimal
//! assignment uses only tight cells, and every perfect assignment over tight
//! cells is optimal. Ties are settled by visiting the real rows in ascending
//! order and moving each one to the lowest column that still leaves a perfect
//! assignment over tight cells for the rows after it. Dummy columns sort
//! after real ones, so a row is left unpaired only when no optimum pairs it.


/// Lower bound for a negated weight; keeps potential updates far from overflow.
const COST_FLOOR: i64 = -(1 << 60);

/// Pairs up rows and columns of `weights` to maximise the total weight.
///
/// Every entity on the smaller side is paired; the surplus entities on the
/// larger side are left out. Among equally heavy assignments the one chosen
/// gives row `0` the lowest possible column, then row `1`, and so on.
/// Returned pairs are `(row, column)` sorted by row. `weights` must be
/// rectangular.
pub(crate) fn solve_max_weight(weights: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let rows = weights.len();
    let columns = weights.first().map_or(0, Vec::len);
    if rows == 0 || columns == 0 {
        return Vec::new();
    }

    let costs = padded_costs(weights, rows.max(columns));
    let solution = hungarian(&costs);
    let tight = solution.tight_cells(&costs);
    lowest_tight_assignment(&tight, solution.assignment, rows)
        .into_iter()
        .take(rows)
        .enumerate()
        .filter(|&(_, column)| column < columns)
        .collect()
}

fn padded_costs(weights: &[Vec<usize>], size: usize) -> Vec<Vec<i64>> {
    (0..size)
        .map(|row| {
            let row_weights = weights.get(row).map_or(&[][..], Vec::as_slice);
            (0..size)
                .map(|column| row_weights.get(column).map_or(0, |&weight| negated(weight)))
                .collect()
        })
        .collect()
}

fn negated(weight: usize) -> i64 {
    i64::try_from(weight).map_or(COST_FLOOR, |value| value.saturating_neg().max(COST_FLOOR))
}

/// Optimal assignment of a square cost table together with its duals.
struct Solution {
    /// Column chosen for each row.
    assignment: Vec<usize>,
    /// Row potentials, 1-based; index `0` is unused.
    row_potential: Vec<i64>,
    /// Column potentials, 1-based; index `0` is the virtual root column.
    column_potential: Vec<i64>,
}

impl Solution {
    /// Cells whose reduced cost is zero under the optimal potentials.
    #[expect(
        clippy::indexing_slicing,
        reason = "potentials hold one entry per row and column plus the virtual root"
    )]
    fn tight_cells(&self, costs: &[Vec<i64>]) -> Vec<Vec<bool>> {
        costs
            .iter()
            .enumerate()
            .map(|(row, row_costs)| {
                row_costs
                    .iter()
                    .enumerate()
                    .map(|(column, &cost)| {
                        cost - self.row_potential[row + 1] - self.column_potential[column + 1] == 0
                    })
                    .collect()
            })
            .collect()
    }
}

/// Minimum-cost assignment of every row of a square table to a distinct column.
///
/// Index `0` of the potential and ownership vectors is a virtual column used
/// as the root of each augmenting search.
#[expect(
    clippy::indexing_slicing,
    reason = "every index is bounded by the table size plus the virtual root"
)]
fn hungarian(costs: &[Vec<i64>]) -> Solution {
    let size = costs.len();
    let mut row_potential = vec![0_i64; size + 1];
    let mut column_potential = vec![0_i64; size + 1];
    // owner[j] is the 1-based row currently matched to 1-based column j.
    let mut owner = vec![0_usize; size + 1];
    let mut way = vec![0_usize; size + 1];

    for row in 1..=size {
        owner[0] = row;
        let mut current = 0_usize;
        let mut slack = vec![i64::MAX; size + 1];
        let mut visited = vec![false; size + 1];

        loop {
            visited[current] = true;
            let active = owner[current];
            let mut delta = i64::MAX;
            let mut next = 0_usize;
            for column in 1..=size {
                if visited[column] {
                    continue;
                }
                let reduced = costs[active - 1][column - 1]
                    - row_potential[active]
                    - column_potential[column];
                if reduced < slack[column] {
                    slack[column] = reduced;
                    way[column] = current;
                }
                if slack[column] < delta {
                    delta = slack[column];
                    next = column;
                }
            }
            for column in 0..=size {
                if visited[column] {
                    row_potential[owner[column]] += delta;
                    column_potential[column] -= delta;
                } else {
                    slack[column] -= delta;
                }
            }
            current = next;
            if owner[current] == 0 {
                break;
            }
        }

        loop {
            let previous = way[current];
            owner[current] = owner[previous];
            current = previous;
            if current == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0_usize; size];
    for (column, &row) in owner.iter().enumerate().skip(1) {
        if row != 0 {
            assignment[row - 1] = column - 1;
        }
    }
    Solution {
        assignment,
        row_potential,
        column_potential,
    }
}

/// Moves rows `0..fixed_rows`, in order, to the lowest tight column that
/// keeps a perfect assignment over tight cells, starting from `assignment`.
#[expect(
    clippy::indexing_slicing,
    reason = "assignment and owner are permutations of the square table's indices"
)]
fn lowest_tight_assignment(
    tight: &[Vec<bool>],
    mut assignment: Vec<usize>,
    fixed_rows: usize,
) -> Vec<usize> {
    let size = assignment.len();
    let mut owner = vec![0_usize; size];
    for (row, &column) in assignment.iter().enumerate() {
        owner[column] = row;
    }
    let mut locked = vec![false; size];

    for row in 0..fixed_rows.min(size) {
        for column in 0..assignment[row] {
            if locked[column] || !tight[row][column] {
                continue;
            }
            if let Some((moved, moved_owner)) =
                reroute(tight, &mut locked, &assignment, &owner, row, column)
            {
                assignment = moved;
                owner = moved_owner;
                break;
            }
        }
        locked[assignment[row]] = true;
    }
    assignment
}

/// Tries to give `row` the column `column`; on success returns the updated
/// assignment and owner tables with `column` left locked.
#[expect(
    clippy::indexing_slicing,
    reason = "assignment and owner are permutations of the square table's indices"
)]
fn reroute(
    tight: &[Vec<bool>],
    locked: &mut [bool],
    assignment: &[usize],
    owner: &[usize],
    row: usize,
    column: usize,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let displaced = owner[column];
    let freed = assignment[row];
    let mut trial = assignment.to_vec();
    let mut trial_owner = owner.to_vec();
    trial[row] = column;
    trial_owner[column] = row;
    locked[column] = true;

    let mut visited = vec![false; assignment.len()];
    let mut search = AugmentingSearch {
        tight,
        locked,
        target: freed,
        visited: &mut visited,
        assignment: &mut trial,
        owner: &mut trial_owner,
    };
    if search.run(displaced) {
        Some((trial, trial_owner))
    } else {
        locked[column] = false;
        None
    }
}

/// Depth-first search for an alternating path of tight cells that ends at
/// the single free column `target`.
struct AugmentingSearch<'a> {
    tight: &'a [Vec<bool>],
    locked: &'a [bool],
    target: usize,
    visited: &'a mut [bool],
    assignment: &'a mut [usize],
    owner: &'a mut [usize],
}

impl AugmentingSearch<'_> {
    #[expect(
        clippy::indexing_slicing,
        reason = "all tables share the square table's size"
    )]
    fn run(&mut self, row: usize) -> bool {
        for column in 0..self.tight[row].len() {
            if self.locked[column] || self.visited[column] || !self.tight[row][column] {
                continue;
            }
            self.visited[column] = true;
            if column == self.target || self.run(self.owner[column]) {
                self.assignment[row] = column;
                self.owner[column] = row;
                return true;
            }
        }
        false
    }
}
