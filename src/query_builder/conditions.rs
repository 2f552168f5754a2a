use std::fmt;

/// Comparison operator of a single selection atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wildcard {
    Equals,
    MoreThanEqual,
    LessThan,
}

impl Wildcard {
    /// Operator symbol as rendered into the selection text
    pub const fn symbol(self) -> &'static str {
        match self {
            Wildcard::Equals => "=",
            Wildcard::MoreThanEqual => ">=",
            Wildcard::LessThan => "<",
        }
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Boolean combinator placed between two sibling operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub const fn keyword(self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

/// A single `column OP ?` comparison together with the value bound to its placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub column: String,
    pub wildcard: Wildcard,
    pub argument: String,
}

impl Atom {
    pub fn new(column: impl Into<String>, wildcard: Wildcard, argument: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            wildcard,
            argument: argument.into(),
        }
    }
}

/// One sibling in an expression: a bare atom or a parenthesized sub-expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Atom(Atom),
    Group(Box<Expression>),
}

impl From<Atom> for Operand {
    fn from(atom: Atom) -> Self {
        Operand::Atom(atom)
    }
}

impl From<Expression> for Operand {
    fn from(expression: Expression) -> Self {
        Operand::Group(Box::new(expression))
    }
}

/// A non-empty sequence of operands separated by combinators
///
/// The first operand stands alone and every following operand carries the
/// combinator that precedes it, so a sequence of `n` operands always holds
/// exactly `n - 1` combinators. Operands at one level render flat, left to
/// right, and the store's own precedence applies between mixed combinators
/// (`AND` binds tighter than `OR`); use a group to force a different shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    first: Operand,
    rest: Vec<(Combinator, Operand)>,
}

impl Expression {
    pub fn new(first: impl Into<Operand>) -> Self {
        Self {
            first: first.into(),
            rest: Vec::new(),
        }
    }

    /// Append an operand preceded by `combinator`
    pub fn push(&mut self, combinator: Combinator, operand: impl Into<Operand>) {
        self.rest.push((combinator, operand.into()));
    }

    /// Join operands at one level with a single combinator
    ///
    /// Returns `None` when there are no operands.
    pub fn join<I, O>(combinator: Combinator, operands: I) -> Option<Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<Operand>,
    {
        let mut operands = operands.into_iter();
        let mut expression = Self::new(operands.next()?);
        for operand in operands {
            expression.push(combinator, operand);
        }
        Some(expression)
    }

    /// Strip the parentheses of an expression made of a single group
    pub fn ungroup(self) -> Self {
        match self.first {
            Operand::Group(inner) if self.rest.is_empty() => *inner,
            first => Self {
                first,
                rest: self.rest,
            },
        }
    }

    /// Operands at this level, in render order
    pub fn operands(&self) -> impl Iterator<Item = &Operand> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, operand)| operand))
    }

    /// Combinators at this level, in render order
    pub fn combinators(&self) -> impl Iterator<Item = Combinator> + '_ {
        self.rest.iter().map(|(combinator, _)| *combinator)
    }

    /// Render the selection text and collect arguments in placeholder order
    pub fn render(&self) -> (String, Vec<String>) {
        let mut sql = String::new();
        let mut arguments = Vec::new();
        self.render_into(&mut sql, &mut arguments);
        (sql, arguments)
    }

    fn render_into(&self, sql: &mut String, arguments: &mut Vec<String>) {
        render_operand(&self.first, sql, arguments);
        for (combinator, operand) in &self.rest {
            sql.push(' ');
            sql.push_str(combinator.keyword());
            sql.push(' ');
            render_operand(operand, sql, arguments);
        }
    }
}

fn render_operand(operand: &Operand, sql: &mut String, arguments: &mut Vec<String>) {
    match operand {
        Operand::Atom(atom) => {
            sql.push_str(&atom.column);
            sql.push(' ');
            sql.push_str(atom.wildcard.symbol());
            sql.push_str(" ?");
            arguments.push(atom.argument.clone());
        }
        Operand::Group(inner) => {
            sql.push('(');
            inner.render_into(sql, arguments);
            sql.push(')');
        }
    }
}
