//! Cache Key Module
//!
//! Composite identity of a memoized call: operation name, positional
//! arguments in call order, and named arguments as an unordered set.

use std::collections::BTreeMap;
use std::fmt;

// == Argument Value ==
/// A hashable argument value that can take part in a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArgValue {
    Unit,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(String),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Unit => write!(f, "()"),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::UInt(u) => write!(f, "{}", u),
            ArgValue::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<()> for ArgValue {
    fn from(_: ()) -> Self {
        ArgValue::Unit
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(value as i64)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::UInt(value as u64)
    }
}

impl From<u64> for ArgValue {
    fn from(value: u64) -> Self {
        ArgValue::UInt(value)
    }
}

impl From<usize> for ArgValue {
    fn from(value: usize) -> Self {
        ArgValue::UInt(value as u64)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<&String> for ArgValue {
    fn from(value: &String) -> Self {
        ArgValue::Str(value.clone())
    }
}

// == Call Arguments ==
/// Arguments of a single call, split into positional and named parts.
///
/// Named arguments live in a `BTreeMap`, so the order in which they were
/// supplied never affects equality or hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Args {
    positional: Vec<ArgValue>,
    named: BTreeMap<String, ArgValue>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a named argument, replacing any earlier value under that name.
    pub fn named(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn positional(&self) -> &[ArgValue] {
        &self.positional
    }

    /// Looks up a named argument.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.named.get(name)
    }
}

// == Into Args ==
/// Conversion from a call's argument shape into [`Args`].
///
/// Implemented for `Args` itself and for tuples of up to four values.
pub trait IntoArgs {
    fn to_args(&self) -> Args;
}

impl IntoArgs for Args {
    fn to_args(&self) -> Args {
        self.clone()
    }
}

impl IntoArgs for () {
    fn to_args(&self) -> Args {
        Args::new()
    }
}

macro_rules! tuple_into_args {
    ($($name:ident),+) => {
        impl<$($name),+> IntoArgs for ($($name,)+)
        where
            $($name: Clone + Into<ArgValue>),+
        {
            #[allow(non_snake_case)]
            fn to_args(&self) -> Args {
                let ($($name,)+) = self.clone();
                Args::new()$(.arg($name))+
            }
        }
    };
}

tuple_into_args!(A);
tuple_into_args!(A, B);
tuple_into_args!(A, B, C);
tuple_into_args!(A, B, C, D);

// == Cache Key ==
/// Identity of a memoized call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: &'static str,
    args: Args,
}

impl CacheKey {
    pub fn new(operation: &'static str, args: Args) -> Self {
        Self { operation, args }
    }

    /// Builds a key from anything convertible into [`Args`].
    pub fn for_call(operation: &'static str, args: &impl IntoArgs) -> Self {
        Self::new(operation, args.to_args())
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn args(&self) -> &Args {
        &self.args
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        let mut first = true;
        for value in &self.args.positional {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
            first = false;
        }
        for (name, value) in &self.args.named {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
            first = false;
        }
        write!(f, ")")
    }
}
