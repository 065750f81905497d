//! The scalar engine: one node per operator application, local partial
//! derivatives captured at forward time, backprop by reverse topological
//! traversal.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

/// Graph node behind a [`Value`] handle.
struct Node {
    /// Forward value. Overwritten in place when the optimizer updates a
    /// parameter leaf.
    data: f64,
    /// Accumulated `d(root)/d(self)` from the most recent backward pass.
    grad: f64,
    /// Nodes this one was computed from. Empty for leaves, one entry for
    /// unary ops, two for binary ops.
    operands: Vec<Value>,
    /// `d(self)/d(operand)`, evaluated at construction time, one per operand.
    partials: Vec<f64>,
}

/// Handle to a scalar node in the computation graph.
///
/// Cloning a `Value` aliases the same node, which is how one node becomes the
/// operand of several downstream expressions; backward sums the gradient
/// contributions arriving from every consumer. Arithmetic is implemented on
/// `&Value` so expression operands stay usable afterwards, and `f64`
/// right-hand sides are accepted directly (they become constant leaves).
///
/// Graphs are `Rc`-shared and not thread-safe; training runs single-threaded.
#[derive(Clone)]
pub struct Value(Rc<RefCell<Node>>);

impl Value {
    /// Creates a leaf node. Leaves have no operands, so backward stops at
    /// them after recording their gradient.
    #[must_use]
    pub fn new(data: f64) -> Self {
        Value::with_operands(data, Vec::new(), Vec::new())
    }

    fn with_operands(data: f64, operands: Vec<Value>, partials: Vec<f64>) -> Self {
        Value(Rc::new(RefCell::new(Node {
            data,
            grad: 0.0,
            operands,
            partials,
        })))
    }

    /// Forward value of this node.
    #[must_use]
    pub fn data(&self) -> f64 {
        self.0.borrow().data
    }

    /// Gradient of the most recent backward root with respect to this node.
    /// Zero until a backward pass reaches the node.
    #[must_use]
    pub fn grad(&self) -> f64 {
        self.0.borrow().grad
    }

    /// Overwrites the forward value. Downstream nodes built from the old
    /// value keep their stale data; rebuild the graph after updating leaves.
    pub fn set_data(&self, data: f64) {
        self.0.borrow_mut().data = data;
    }

    /// Resets the accumulated gradient to zero. Call on every parameter
    /// before a new backward pass, otherwise contributions pile up across
    /// passes.
    pub fn zero_grad(&self) {
        self.0.borrow_mut().grad = 0.0;
    }

    fn accumulate_grad(&self, g: f64) {
        self.0.borrow_mut().grad += g;
    }

    /// Returns true when both handles alias the same graph node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// `self` raised to a constant power. Local partial: `exp * self^(exp-1)`.
    ///
    /// A zero base with `exp < 1.0` produces `inf` or NaN in the result or
    /// the partial, following IEEE `powf`; the engine propagates such values
    /// without guarding. Callers that cannot rule the edge out must check
    /// the base themselves.
    #[must_use]
    pub fn pow(&self, exp: f64) -> Value {
        let base = self.data();
        Value::with_operands(
            base.powf(exp),
            vec![self.clone()],
            vec![exp * base.powf(exp - 1.0)],
        )
    }

    /// `e^self`. Local partial is the result itself.
    #[must_use]
    pub fn exp(&self) -> Value {
        let out = self.data().exp();
        Value::with_operands(out, vec![self.clone()], vec![out])
    }

    /// Natural logarithm. Local partial: `1 / self`.
    #[must_use]
    pub fn log(&self) -> Value {
        let data = self.data();
        Value::with_operands(data.ln(), vec![self.clone()], vec![1.0 / data])
    }

    /// Rectified linear unit, `max(0, self)`. Local partial is 1 for a
    /// positive input and 0 otherwise, including at exactly zero.
    #[must_use]
    pub fn relu(&self) -> Value {
        let data = self.data();
        Value::with_operands(
            if data > 0.0 { data } else { 0.0 },
            vec![self.clone()],
            vec![if data > 0.0 { 1.0 } else { 0.0 }],
        )
    }

    /// Hyperbolic tangent. Local partial: `1 - tanh(self)^2`.
    #[must_use]
    pub fn tanh(&self) -> Value {
        let out = self.data().tanh();
        Value::with_operands(out, vec![self.clone()], vec![1.0 - out * out])
    }

    /// Backpropagates from this node: seeds `grad = 1.0` here, then applies
    /// the chain rule to every reachable node in reverse topological order.
    ///
    /// The order comes from a post-order depth-first search over operand
    /// edges, deduplicated by node identity so shared subexpressions are
    /// visited once. Reversing it guarantees a node's gradient is complete
    /// before the node passes contributions to its operands. Calling this on
    /// a leaf just sets the leaf's gradient to 1.
    pub fn backward(&self) {
        let mut order = Vec::new();
        let mut seen: HashSet<*const RefCell<Node>> = HashSet::new();

        fn visit(
            v: &Value,
            seen: &mut HashSet<*const RefCell<Node>>,
            order: &mut Vec<Value>,
        ) {
            if !seen.insert(Rc::as_ptr(&v.0)) {
                return;
            }
            for operand in &v.0.borrow().operands {
                visit(operand, seen, order);
            }
            order.push(v.clone());
        }

        visit(self, &mut seen, &mut order);

        self.0.borrow_mut().grad = 1.0;
        for v in order.iter().rev() {
            let g = v.grad();
            let node = v.0.borrow();
            for (operand, &partial) in node.operands.iter().zip(node.partials.iter()) {
                operand.accumulate_grad(partial * g);
            }
        }
    }
}

// Prints data and grad only; walking operands would dump whole graphs.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("Value")
            .field("data", &node.data)
            .field("grad", &node.grad)
            .finish()
    }
}

impl Add for &Value {
    type Output = Value;

    fn add(self, rhs: Self) -> Value {
        Value::with_operands(
            self.data() + rhs.data(),
            vec![self.clone(), rhs.clone()],
            vec![1.0, 1.0],
        )
    }
}

impl Mul for &Value {
    type Output = Value;

    fn mul(self, rhs: Self) -> Value {
        Value::with_operands(
            self.data() * rhs.data(),
            vec![self.clone(), rhs.clone()],
            vec![rhs.data(), self.data()],
        )
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        self * &Value::new(-1.0)
    }
}

impl Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: Self) -> Value {
        self + &(-rhs)
    }
}

impl Div for &Value {
    type Output = Value;

    fn div(self, rhs: Self) -> Value {
        self * &rhs.pow(-1.0)
    }
}

// `f64` right-hand sides wrap into constant leaves, so `&x * 2.0` reads like
// the math it encodes. Constants take gradient contributions like any other
// leaf but nothing ever reads them back.

impl Add<f64> for &Value {
    type Output = Value;

    fn add(self, rhs: f64) -> Value {
        self + &Value::new(rhs)
    }
}

impl Sub<f64> for &Value {
    type Output = Value;

    fn sub(self, rhs: f64) -> Value {
        self - &Value::new(rhs)
    }
}

impl Mul<f64> for &Value {
    type Output = Value;

    fn mul(self, rhs: f64) -> Value {
        self * &Value::new(rhs)
    }
}

impl Div<f64> for &Value {
    type Output = Value;

    fn div(self, rhs: f64) -> Value {
        self / &Value::new(rhs)
    }
}
