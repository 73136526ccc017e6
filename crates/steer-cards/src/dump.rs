//! Canonical indented rendering of steering-card containers.
//!
//! The printer carries no mutable state: the nesting depth is threaded through
//! every call, so independent or interleaved dumps never share indentation.

use std::fmt::Write;

use crate::module::Module;
use crate::parameters::Parameters;
use crate::sequence::Sequence;
use crate::value::{Limits, Scalar, Value};

/// Layout options for [`Parameters::dump_with`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpConfig {
    /// Number of spaces added per nesting level.
    pub indent_width: usize,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

pub(crate) struct Printer {
    indent_width: usize,
}

impl Printer {
    pub(crate) fn new(config: &DumpConfig) -> Self {
        Self {
            indent_width: config.indent_width,
        }
    }

    pub(crate) fn render<F>(config: &DumpConfig, body: F) -> String
    where
        F: FnOnce(&Printer, &mut String),
    {
        let printer = Printer::new(config);
        let mut out = String::new();
        body(&printer, &mut out);
        out
    }

    fn pad(&self, out: &mut String, depth: usize) {
        out.extend(std::iter::repeat(' ').take(depth * self.indent_width));
    }

    pub(crate) fn parameters(&self, out: &mut String, params: &Parameters, depth: usize) {
        out.push_str("Parameters(\n");
        self.entries(out, params, depth);
    }

    pub(crate) fn module(&self, out: &mut String, module: &Module, depth: usize) {
        out.push_str("Module(");
        write_str_literal(out, module.name());
        out.push_str(",\n");
        self.entries(out, module.params(), depth);
    }

    pub(crate) fn sequence(&self, out: &mut String, sequence: &Sequence, depth: usize) {
        out.push_str("Sequence(\n");
        for module in sequence.iter() {
            self.pad(out, depth + 1);
            self.module(out, module, depth + 1);
            out.push_str(",\n");
        }
        self.pad(out, depth);
        out.push(')');
    }

    pub(crate) fn value(&self, out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Scalar(scalar) => write_scalar(out, scalar),
            Value::List(items) => write_list(out, items),
            Value::Limits(limits) => write_limits(out, limits),
            Value::Params(params) => self.parameters(out, params, depth),
            Value::Module(module) => self.module(out, module, depth),
            Value::Sequence(sequence) => self.sequence(out, sequence, depth),
        }
    }

    fn entries(&self, out: &mut String, params: &Parameters, depth: usize) {
        for (key, value) in params.iter() {
            self.pad(out, depth + 1);
            out.push_str(key);
            out.push_str(" = ");
            self.value(out, value, depth + 1);
            out.push_str(",\n");
        }
        self.pad(out, depth);
        out.push(')');
    }
}

fn write_scalar(out: &mut String, scalar: &Scalar) {
    match scalar {
        Scalar::Bool(true) => out.push_str("True"),
        Scalar::Bool(false) => out.push_str("False"),
        Scalar::Int(value) => {
            let _ = write!(out, "{value}");
        }
        Scalar::Float(value) => write_float(out, *value),
        Scalar::Str(value) => write_str_literal(out, value),
    }
}

// `{:?}` keeps a decimal point or exponent on every finite float.
fn write_float(out: &mut String, value: f64) {
    let _ = write!(out, "{value:?}");
}

fn write_list(out: &mut String, items: &[Scalar]) {
    out.push('(');
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        write_scalar(out, item);
    }
    if items.len() == 1 {
        out.push(',');
    }
    out.push(')');
}

fn write_limits(out: &mut String, limits: &Limits) {
    out.push_str("Limits(");
    write_bound(out, limits.min());
    out.push_str(", ");
    write_bound(out, limits.max());
    out.push(')');
}

fn write_bound(out: &mut String, bound: Option<f64>) {
    match bound {
        Some(value) => write_float(out, value),
        None => out.push_str("None"),
    }
}

fn write_str_literal(out: &mut String, value: &str) {
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('\'');
}
