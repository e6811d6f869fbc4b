//! # Pivot rules
//!
//! Strategies for selecting the column that enters the basis.
use crate::algorithm::two_phase::column_source::ColumnSource;
use crate::algorithm::two_phase::strategy::inspection_order::InspectionOrder;
use crate::algorithm::two_phase::tableau::Tableau;
use crate::data::linear_algebra::SparseTuple;

/// Deciding how to pivot.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected for a primal pivot, a row needs to be found. This decision is
/// made independent of the strategy, see `Tableau::select_primal_pivot_row`.
pub trait PivotRule {
    /// Column selection rule for the primal Simplex method.
    ///
    /// Columns are inspected in the order given by `order`, from the current position until the
    /// end of the pass. Basic columns are skipped. Each inspected column is reported back to the
    /// order as liked when its relative cost is below `-tolerance` and disliked otherwise.
    ///
    /// # Arguments
    ///
    /// * `tableau`: Current basis.
    /// * `dual`: Dual values for that basis, see `Tableau::left_basis_solution`.
    /// * `order`: Order of inspection, with a pass already started.
    /// * `tolerance`: How negative the relative cost needs to be for a column to be improving.
    ///
    /// # Return value
    ///
    /// The entering column and its relative cost, `None` if no column is improving.
    fn select_primal_pivot_column<S, O>(
        &mut self,
        tableau: &Tableau<S>,
        dual: &[f64],
        order: &mut O,
        tolerance: f64,
    ) -> Option<SparseTuple<f64>>
    where
        S: ColumnSource + ?Sized,
        O: InspectionOrder,
    ;
}

/// Simply pivot on the first column, which has a negative relative cost.
pub struct FirstProfitable;
impl PivotRule for FirstProfitable {
    fn select_primal_pivot_column<S, O>(
        &mut self,
        tableau: &Tableau<S>,
        dual: &[f64],
        order: &mut O,
        tolerance: f64,
    ) -> Option<SparseTuple<f64>>
    where
        S: ColumnSource + ?Sized,
        O: InspectionOrder,
    {
        while order.has_next() {
            let column = order.take();
            if tableau.is_in_basis(column) {
                continue;
            }

            let cost = tableau.relative_cost(dual, column);
            if cost < -tolerance {
                order.liked(column);
                return Some((column, cost));
            }
            order.disliked(column);
        }

        None
    }
}

/// Simply pivot on the column, which has the most negative relative cost.
pub struct SteepestDescentAlongVariable;
impl PivotRule for SteepestDescentAlongVariable {
    fn select_primal_pivot_column<S, O>(
        &mut self,
        tableau: &Tableau<S>,
        dual: &[f64],
        order: &mut O,
        tolerance: f64,
    ) -> Option<SparseTuple<f64>>
    where
        S: ColumnSource + ?Sized,
        O: InspectionOrder,
    {
        let mut smallest: Option<SparseTuple<f64>> = None;
        while order.has_next() {
            let column = order.take();
            if tableau.is_in_basis(column) {
                continue;
            }

            let cost = tableau.relative_cost(dual, column);
            if cost < -tolerance {
                order.liked(column);
                if let Some((existing_column, existing_cost)) = smallest.as_mut() {
                    if cost < *existing_cost {
                        *existing_column = column;
                        *existing_cost = cost;
                    }
                } else { smallest = Some((column, cost)) }
            } else {
                order.disliked(column);
            }
        }

        smallest
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::two_phase::strategy::inspection_order::{InspectionOrder, TrackingOrder};
    use crate::algorithm::two_phase::strategy::pivot_rule::{FirstProfitable, PivotRule, SteepestDescentAlongVariable};
    use crate::algorithm::two_phase::tableau::Tableau;
    use crate::data::linear_algebra::matrix::DenseMatrix;
    use crate::data::linear_program::canonical_form::CanonicalForm;

    /// Slack basis with relative costs equal to the costs.
    fn problem() -> CanonicalForm<DenseMatrix> {
        let constraints = DenseMatrix::new(vec![
            vec![1f64, 0f64, 1f64, 1f64, 1f64],
            vec![0f64, 1f64, 1f64, 2f64, 3f64],
        ], 5).unwrap();
        CanonicalForm::new(constraints, vec![1f64, 1f64], vec![0f64, 0f64, -1f64, 0f64, -3f64]).unwrap()
    }

    #[test]
    fn first_profitable() {
        let problem = problem();
        let tableau = Tableau::new(&problem, vec![0, 1]).unwrap();
        let dual = tableau.left_basis_solution();
        let mut order = TrackingOrder::new(5);
        order.start_pass();

        let selected = FirstProfitable.select_primal_pivot_column(&tableau, &dual, &mut order, 1e-5);
        assert_eq!(selected, Some((2, -1f64)));
        // Column 3 and 4 were not inspected
        assert!(order.has_next());

        order.start_pass();
        assert_eq!(order.take(), 2);
    }

    #[test]
    fn steepest_descent() {
        let problem = problem();
        let tableau = Tableau::new(&problem, vec![0, 1]).unwrap();
        let dual = tableau.left_basis_solution();
        let mut order = TrackingOrder::new(5);
        order.start_pass();

        let selected = SteepestDescentAlongVariable.select_primal_pivot_column(&tableau, &dual, &mut order, 1e-5);
        assert_eq!(selected, Some((4, -3f64)));
        assert!(!order.has_next());

        // Liked columns come first, the disliked one last
        order.start_pass();
        assert_eq!(order.current_order(), &[2, 4, 0, 1, 3]);
    }

    #[test]
    fn optimal() {
        let problem = problem();
        let tableau = Tableau::new(&problem, vec![0, 1]).unwrap();
        let dual = tableau.left_basis_solution();
        let mut order = TrackingOrder::new(5);
        order.start_pass();

        let selected = FirstProfitable.select_primal_pivot_column(&tableau, &dual, &mut order, 5f64);
        assert_eq!(selected, None);
    }
}
