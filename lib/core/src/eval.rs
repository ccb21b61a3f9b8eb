/// Evaluation of a formula object under a complete valuation.
///
/// Propositional objects are evaluated under one `bool` per variable,
/// equality objects under one class id per term.
pub trait Eval {
    type Value;

    fn eval(&self, valuation: &[Self::Value]) -> bool;
}
