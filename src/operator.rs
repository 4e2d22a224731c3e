//! Arithmetic verbs for math commands

/// Operation applied by a math command to its bound variable.
///
/// Each operator maps to one lowercase verb; `Empty` is the no-operand query
/// form (math command invoked with no tail) and has no verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Pow,
    Set,
    /// Pure read, no mutation.
    Empty,
}

/// Canonical verbs, in completion order. `Empty` is deliberately absent.
pub const VERBS: [(&str, Operator); 7] = [
    ("add", Operator::Add),
    ("sub", Operator::Sub),
    ("mult", Operator::Mult),
    ("div", Operator::Div),
    ("mod", Operator::Mod),
    ("pow", Operator::Pow),
    ("set", Operator::Set),
];

impl Operator {
    /// Resolve verb text. Unknown text resolves to `None`.
    pub fn from_verb(verb: &str) -> Option<Self> {
        VERBS.iter().find(|(v, _)| *v == verb).map(|(_, op)| *op)
    }

    /// Canonical verb string. Empty string for `Empty`.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mult => "mult",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::Pow => "pow",
            Self::Set => "set",
            Self::Empty => "",
        }
    }

    /// Combine the current value with an operand.
    ///
    /// Division, modulo and power follow IEEE float semantics: divide by zero
    /// yields an infinity or NaN in the result rather than an error.
    pub fn apply(self, current: f64, operand: f64) -> f64 {
        match self {
            Self::Add => current + operand,
            Self::Sub => current - operand,
            Self::Mult => current * operand,
            Self::Div => current / operand,
            Self::Mod => current % operand,
            Self::Pow => current.powf(operand),
            Self::Set => operand,
            Self::Empty => current,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_round_trip() {
        for (verb, op) in VERBS {
            assert_eq!(Operator::from_verb(verb), Some(op));
            assert_eq!(op.verb(), verb);
        }
        assert_eq!(Operator::from_verb("foo"), None);
        assert_eq!(Operator::from_verb(""), None);
    }

    #[test]
    fn apply_arithmetic() {
        assert_eq!(Operator::Add.apply(10.0, 5.0), 15.0);
        assert_eq!(Operator::Sub.apply(10.0, 5.0), 5.0);
        assert_eq!(Operator::Mult.apply(10.0, 5.0), 50.0);
        assert_eq!(Operator::Div.apply(10.0, 5.0), 2.0);
        assert_eq!(Operator::Mod.apply(10.0, 3.0), 1.0);
        assert_eq!(Operator::Pow.apply(2.0, 3.0), 8.0);
        assert_eq!(Operator::Set.apply(10.0, 5.0), 5.0);
        assert_eq!(Operator::Empty.apply(10.0, 5.0), 10.0);
    }

    #[test]
    fn apply_keeps_ieee_semantics() {
        assert_eq!(Operator::Div.apply(1.0, 0.0), f64::INFINITY);
        assert!(Operator::Div.apply(0.0, 0.0).is_nan());
        assert!(Operator::Mod.apply(1.0, 0.0).is_nan());
    }
}
