//! Data-source-driven case generation.
//!
//! A data source yields one row of argument values per generated case. Rows
//! are bound to the target's declared parameters (by key for named rows, by
//! position otherwise) and each generated case carries a display name built
//! from the case name and the stringified argument list. Sources live in a
//! registration table keyed by name; a plain row function is preferred over
//! a constructed source instance registered under the same name.

use crate::result::{CotejarError, CotejarResult};
use crate::runner::CaseResult;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

// =============================================================================
// ARGUMENT VALUES
// =============================================================================

/// One argument value produced by a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// A boolean
    Bool(bool),
    /// A signed integer
    Int(i64),
    /// A float
    Float(f64),
    /// A string
    Str(String),
    /// A nested sequence, rendered as `{ a, b, c }`
    Seq(Vec<ArgValue>),
}

impl ArgValue {
    /// Convert a JSON value into an argument value. Nested objects and
    /// nulls have no argument rendering and are rejected.
    ///
    /// # Errors
    ///
    /// [`CotejarError::Json`] for a null or object value.
    pub fn from_json(value: serde_json::Value) -> CotejarResult<Self> {
        match value {
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => Ok(Self::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => Ok(Self::Str(s)),
            serde_json::Value::Array(items) => Ok(Self::Seq(
                items
                    .into_iter()
                    .map(Self::from_json)
                    .collect::<CotejarResult<_>>()?,
            )),
            other => Err(serde_json::Error::custom(format!(
                "value has no argument rendering: {other}"
            ))
            .into()),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Seq(items) => {
                if items.is_empty() {
                    return write!(f, "{{ }}");
                }
                write!(f, "{{ ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, " }}")
            }
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<V: Into<ArgValue>> From<Vec<V>> for ArgValue {
    fn from(values: Vec<V>) -> Self {
        Self::Seq(values.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// DATA ROWS
// =============================================================================

/// One generated invocation's argument series: values in declaration order,
/// or key/value pairs for binding by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataRow {
    /// Values bound to parameters by position
    Positional(Vec<ArgValue>),
    /// Values bound to parameters by key
    Named(Vec<(String, ArgValue)>),
}

impl DataRow {
    /// Build a positional row.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ArgValue>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Build a named row.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ArgValue>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Number of values in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Named(pairs) => pairs.len(),
        }
    }

    /// Whether the row carries no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for DataRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Self::Named(pairs) => {
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Serialize a struct into a named row, one pair per field.
///
/// The structural counterpart of binding arguments from an object's
/// properties: any `Serialize` type whose serialized form is a map becomes
/// a row its field names can bind against.
///
/// # Errors
///
/// [`CotejarError::Json`] when the value does not serialize to a map or a
/// field has no argument rendering.
pub fn row_from_struct<T: Serialize>(value: &T) -> CotejarResult<DataRow> {
    let json = serde_json::to_value(value)?;
    match json {
        serde_json::Value::Object(fields) => Ok(DataRow::Named(
            fields
                .into_iter()
                .map(|(name, field)| Ok((name, ArgValue::from_json(field)?)))
                .collect::<CotejarResult<_>>()?,
        )),
        other => Err(serde_json::Error::custom(format!(
            "expected a struct serializing to a map, got {other}"
        ))
        .into()),
    }
}

// =============================================================================
// SOURCES AND REGISTRY
// =============================================================================

/// A named producer of data rows. Zero-argument by construction: a source
/// holds whatever state it needs and yields a fresh row list per call.
pub trait DataSource {
    /// Produce the rows, one per generated case.
    fn rows(&self) -> Vec<DataRow>;
}

impl<F> DataSource for F
where
    F: Fn() -> Vec<DataRow>,
{
    fn rows(&self) -> Vec<DataRow> {
        self()
    }
}

/// Plain function tier of the registry.
pub type RowsFn = fn() -> Vec<DataRow>;

/// Registration table mapping source names to row producers.
///
/// Two tiers: plain row functions and constructed source instances. A
/// function is preferred when both tiers claim a name.
#[derive(Default)]
pub struct DataSourceRegistry {
    functions: HashMap<String, RowsFn>,
    constructed: HashMap<String, Box<dyn DataSource + Send + Sync>>,
}

impl DataSourceRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain row function in the preferred tier.
    pub fn register_fn(&mut self, name: impl Into<String>, rows: RowsFn) {
        self.functions.insert(name.into(), rows);
    }

    /// Register a constructed source instance in the fallback tier.
    pub fn register_source<S>(&mut self, name: impl Into<String>, source: S)
    where
        S: DataSource + Send + Sync + 'static,
    {
        self.constructed.insert(name.into(), Box::new(source));
    }

    /// Register a source constructed through its `Default` in the fallback
    /// tier.
    pub fn register_default<S>(&mut self, name: impl Into<String>)
    where
        S: DataSource + Default + Send + Sync + 'static,
    {
        self.register_source(name, S::default());
    }

    /// Produce the rows for a named source, preferred tier first.
    ///
    /// # Errors
    ///
    /// [`CotejarError::UnknownDataSource`] when no tier knows the name.
    pub fn rows(&self, name: &str) -> CotejarResult<Vec<DataRow>> {
        if let Some(rows) = self.functions.get(name) {
            return Ok(rows());
        }
        if let Some(source) = self.constructed.get(name) {
            return Ok(source.rows());
        }
        Err(CotejarError::UnknownDataSource {
            name: name.to_string(),
        })
    }

    /// Whether any tier has an entry for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name) || self.constructed.contains_key(name)
    }

    /// Number of registered sources across both tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len() + self.constructed.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.constructed.is_empty()
    }
}

impl fmt::Debug for DataSourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("constructed", &self.constructed.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// PARAMETER BINDING
// =============================================================================

/// The target's declared parameter list, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    names: Vec<String>,
}

impl ParamSpec {
    /// Declare the parameter names, in binding order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The declared names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the target takes no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Bind a row to these parameters: by key for a named row, by position
    /// otherwise. Extra keys in a named row are ignored; a positional row
    /// must match the arity exactly.
    ///
    /// # Errors
    ///
    /// [`CotejarError::UnboundParameter`] for a missing key, a short
    /// positional row, or a surplus positional value.
    pub fn bind(&self, row: &DataRow) -> CotejarResult<BoundArgs> {
        match row {
            DataRow::Named(pairs) => {
                let mut bound = Vec::with_capacity(self.names.len());
                for name in &self.names {
                    let Some((_, value)) = pairs.iter().find(|(key, _)| key == name) else {
                        return Err(CotejarError::UnboundParameter {
                            parameter: name.clone(),
                            row: format!("({row})"),
                        });
                    };
                    bound.push((name.clone(), value.clone()));
                }
                Ok(BoundArgs { values: bound })
            }
            DataRow::Positional(values) => {
                if values.len() < self.names.len() {
                    return Err(CotejarError::UnboundParameter {
                        parameter: self.names[values.len()].clone(),
                        row: format!("({row})"),
                    });
                }
                if values.len() > self.names.len() {
                    return Err(CotejarError::UnboundParameter {
                        parameter: format!("#{}", self.names.len()),
                        row: format!("({row})"),
                    });
                }
                Ok(BoundArgs {
                    values: self
                        .names
                        .iter()
                        .cloned()
                        .zip(values.iter().cloned())
                        .collect(),
                })
            }
        }
    }
}

/// A row bound to a parameter list: every parameter paired with its value,
/// in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundArgs {
    values: Vec<(String, ArgValue)>,
}

impl BoundArgs {
    /// Look up a bound value by parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// The bound values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &ArgValue> {
        self.values.iter().map(|(_, value)| value)
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for BoundArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

// =============================================================================
// CASE GENERATION
// =============================================================================

/// Display name for one generated case: the case name with the stringified
/// argument list.
#[must_use]
pub fn display_name(case: &str, row: &DataRow) -> String {
    format!("{case} ({row})")
}

/// A case declaration driven by a named data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataDrivenCase {
    name: String,
    source: String,
    params: ParamSpec,
}

impl DataDrivenCase {
    /// Declare a case fed by `source`, binding each row to `params`.
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<String>, params: ParamSpec) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            params,
        }
    }

    /// The case name display names are derived from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The data source name.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Generate one case per source row. A row that fails to bind still
    /// yields a generated case; it reports the bind error when run, and the
    /// remaining rows are unaffected.
    ///
    /// # Errors
    ///
    /// [`CotejarError::UnknownDataSource`] when the source name is not
    /// registered.
    pub fn generate(&self, registry: &DataSourceRegistry) -> CotejarResult<Vec<GeneratedCase>> {
        let rows = registry.rows(&self.source)?;
        tracing::debug!(case = %self.name, source = %self.source, rows = rows.len(), "generated data-driven cases");
        Ok(rows
            .into_iter()
            .map(|row| {
                let name = display_name(&self.name, &row);
                let binding = self.params.bind(&row);
                GeneratedCase { name, binding }
            })
            .collect())
    }

    /// Generate and run every case against `body`, one result per row.
    ///
    /// # Errors
    ///
    /// [`CotejarError::UnknownDataSource`] when the source name is not
    /// registered; individual bind or check failures land in the returned
    /// results instead.
    pub fn run_all<F>(
        &self,
        registry: &DataSourceRegistry,
        mut body: F,
    ) -> CotejarResult<Vec<CaseResult>>
    where
        F: FnMut(&BoundArgs) -> CotejarResult<()>,
    {
        let generated = self.generate(registry)?;
        Ok(generated
            .into_iter()
            .map(|case| case.run(&mut body))
            .collect())
    }
}

/// One generated case: a display name plus the row's binding outcome.
#[derive(Debug)]
pub struct GeneratedCase {
    name: String,
    binding: CotejarResult<BoundArgs>,
}

impl GeneratedCase {
    /// The generated display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the row bound cleanly.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.binding.is_ok()
    }

    /// Run the case body against the bound arguments, stamping the body's
    /// duration on the result. A row that never bound produces an errored
    /// result without invoking the body.
    pub fn run<F>(self, body: F) -> CaseResult
    where
        F: FnOnce(&BoundArgs) -> CotejarResult<()>,
    {
        match self.binding {
            Err(err) => CaseResult::error(self.name, err.to_string()),
            Ok(args) => {
                let start = Instant::now();
                let verdict = body(&args);
                CaseResult::from_check(self.name, verdict).with_duration(start.elapsed())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod arg_values {
        use super::*;

        #[test]
        fn test_display_scalars() {
            assert_eq!(ArgValue::from(true).to_string(), "true");
            assert_eq!(ArgValue::from(42).to_string(), "42");
            assert_eq!(ArgValue::from(2.5).to_string(), "2.5");
            assert_eq!(ArgValue::from("abc").to_string(), "abc");
        }

        #[test]
        fn test_display_sequence_in_braces() {
            let seq = ArgValue::from(vec![1, 2, 3]);
            assert_eq!(seq.to_string(), "{ 1, 2, 3 }");
        }

        #[test]
        fn test_display_empty_sequence() {
            let seq = ArgValue::Seq(Vec::new());
            assert_eq!(seq.to_string(), "{ }");
        }

        #[test]
        fn test_from_json_scalars() {
            assert_eq!(
                ArgValue::from_json(serde_json::json!(7)).unwrap(),
                ArgValue::Int(7)
            );
            assert_eq!(
                ArgValue::from_json(serde_json::json!(0.5)).unwrap(),
                ArgValue::Float(0.5)
            );
        }

        #[test]
        fn test_from_json_rejects_null() {
            assert!(ArgValue::from_json(serde_json::Value::Null).is_err());
        }
    }

    mod rows {
        use super::*;

        #[test]
        fn test_positional_display() {
            let row = DataRow::positional([ArgValue::from(1), ArgValue::from("x")]);
            assert_eq!(row.to_string(), "1, x");
        }

        #[test]
        fn test_named_display() {
            let row = DataRow::named([("a", 1), ("b", 2)]);
            assert_eq!(row.to_string(), "a: 1, b: 2");
        }

        #[test]
        fn test_display_name_format() {
            let row = DataRow::positional([ArgValue::from(1), ArgValue::from(vec![2, 3])]);
            assert_eq!(display_name("sums", &row), "sums (1, { 2, 3 })");
        }

        #[test]
        fn test_row_from_struct_produces_named_row() {
            #[derive(Serialize)]
            struct Point {
                x: f64,
                y: f64,
            }
            let row = row_from_struct(&Point { x: 1.5, y: -2.0 }).unwrap();
            let spec = ParamSpec::new(["x", "y"]);
            let bound = spec.bind(&row).unwrap();
            assert_eq!(bound.get("x"), Some(&ArgValue::Float(1.5)));
            assert_eq!(bound.get("y"), Some(&ArgValue::Float(-2.0)));
        }

        #[test]
        fn test_row_from_struct_rejects_scalar() {
            assert!(row_from_struct(&5).is_err());
        }
    }

    mod registry {
        use super::*;

        fn two_rows() -> Vec<DataRow> {
            vec![
                DataRow::positional([ArgValue::from(1)]),
                DataRow::positional([ArgValue::from(2)]),
            ]
        }

        #[test]
        fn test_function_source() {
            let mut registry = DataSourceRegistry::new();
            registry.register_fn("pairs", two_rows);
            assert_eq!(registry.rows("pairs").unwrap().len(), 2);
        }

        #[test]
        fn test_unknown_source_is_fatal() {
            let registry = DataSourceRegistry::new();
            let err = registry.rows("missing").unwrap_err();
            assert!(matches!(err, CotejarError::UnknownDataSource { name } if name == "missing"));
        }

        #[test]
        fn test_constructed_source() {
            #[derive(Default)]
            struct Fixed;
            impl DataSource for Fixed {
                fn rows(&self) -> Vec<DataRow> {
                    vec![DataRow::positional([ArgValue::from(9)])]
                }
            }
            let mut registry = DataSourceRegistry::new();
            registry.register_default::<Fixed>("fixed");
            assert_eq!(registry.rows("fixed").unwrap().len(), 1);
        }

        #[test]
        fn test_function_tier_preferred() {
            let mut registry = DataSourceRegistry::new();
            registry.register_source("shared", || vec![DataRow::positional([ArgValue::from(1)])]);
            registry.register_fn("shared", two_rows);
            assert_eq!(registry.rows("shared").unwrap().len(), 2);
        }
    }

    mod binding {
        use super::*;

        #[test]
        fn test_named_binding_reorders_by_declaration() {
            let spec = ParamSpec::new(["first", "second"]);
            let row = DataRow::named([("second", 2), ("first", 1)]);
            let bound = spec.bind(&row).unwrap();
            let in_order: Vec<_> = bound.values().cloned().collect();
            assert_eq!(in_order, vec![ArgValue::Int(1), ArgValue::Int(2)]);
        }

        #[test]
        fn test_named_binding_ignores_extra_keys() {
            let spec = ParamSpec::new(["x"]);
            let row = DataRow::named([("x", 1), ("unused", 2)]);
            assert_eq!(spec.bind(&row).unwrap().len(), 1);
        }

        #[test]
        fn test_missing_key_names_the_parameter() {
            let spec = ParamSpec::new(["x", "y"]);
            let row = DataRow::named([("x", 1)]);
            let err = spec.bind(&row).unwrap_err();
            assert!(matches!(
                err,
                CotejarError::UnboundParameter { parameter, .. } if parameter == "y"
            ));
        }

        #[test]
        fn test_positional_binding_in_order() {
            let spec = ParamSpec::new(["a", "b"]);
            let row = DataRow::positional([ArgValue::from(10), ArgValue::from(20)]);
            let bound = spec.bind(&row).unwrap();
            assert_eq!(bound.get("a"), Some(&ArgValue::Int(10)));
            assert_eq!(bound.get("b"), Some(&ArgValue::Int(20)));
        }

        #[test]
        fn test_short_positional_row_fails() {
            let spec = ParamSpec::new(["a", "b", "c"]);
            let row = DataRow::positional([ArgValue::from(1)]);
            let err = spec.bind(&row).unwrap_err();
            assert!(matches!(
                err,
                CotejarError::UnboundParameter { parameter, .. } if parameter == "b"
            ));
        }

        #[test]
        fn test_surplus_positional_value_fails() {
            let spec = ParamSpec::new(["a"]);
            let row = DataRow::positional([ArgValue::from(1), ArgValue::from(2)]);
            let err = spec.bind(&row).unwrap_err();
            assert!(matches!(
                err,
                CotejarError::UnboundParameter { parameter, .. } if parameter == "#1"
            ));
        }

        #[test]
        fn test_empty_spec_binds_empty_row() {
            let spec = ParamSpec::new(Vec::<String>::new());
            let bound = spec.bind(&DataRow::positional(Vec::<ArgValue>::new())).unwrap();
            assert!(bound.is_empty());
        }
    }

    mod generation {
        use super::*;
        use crate::runner::CaseOutcome;

        fn sum_rows() -> Vec<DataRow> {
            vec![
                DataRow::named([("a", 1), ("b", 2), ("total", 3)]),
                DataRow::named([("a", 2), ("b", 2), ("total", 4)]),
                DataRow::named([("a", 5), ("b", 5), ("total", 11)]),
            ]
        }

        fn int_arg(args: &BoundArgs, name: &str) -> i64 {
            match args.get(name) {
                Some(ArgValue::Int(i)) => *i,
                other => panic!("expected int for {name}, got {other:?}"),
            }
        }

        #[test]
        fn test_one_result_per_row() {
            let mut registry = DataSourceRegistry::new();
            registry.register_fn("sums", sum_rows);
            let case = DataDrivenCase::new("addition", "sums", ParamSpec::new(["a", "b", "total"]));
            let results = case
                .run_all(&registry, |args| {
                    let total = int_arg(args, "a") + int_arg(args, "b");
                    crate::check(total).is_equal_to(int_arg(args, "total"))
                })
                .unwrap();
            assert_eq!(results.len(), 3);
            assert_eq!(results[0].outcome, CaseOutcome::Passed);
            assert_eq!(results[1].outcome, CaseOutcome::Passed);
            assert_eq!(results[2].outcome, CaseOutcome::Failed);
        }

        #[test]
        fn test_display_names_on_results() {
            let mut registry = DataSourceRegistry::new();
            registry.register_fn("single", || {
                vec![DataRow::positional([ArgValue::from(1), ArgValue::from(2)])]
            });
            let case = DataDrivenCase::new("pairing", "single", ParamSpec::new(["x", "y"]));
            let results = case.run_all(&registry, |_args| Ok(())).unwrap();
            assert_eq!(results[0].name, "pairing (1, 2)");
        }

        #[test]
        fn test_unbindable_row_errors_and_rest_still_run() {
            let mut registry = DataSourceRegistry::new();
            registry.register_fn("ragged", || {
                vec![
                    DataRow::positional([ArgValue::from(1)]),
                    DataRow::positional(Vec::<ArgValue>::new()),
                    DataRow::positional([ArgValue::from(3)]),
                ]
            });
            let case = DataDrivenCase::new("ragged", "ragged", ParamSpec::new(["x"]));
            let results = case.run_all(&registry, |_args| Ok(())).unwrap();
            assert_eq!(results.len(), 3);
            assert_eq!(results[0].outcome, CaseOutcome::Passed);
            assert_eq!(results[1].outcome, CaseOutcome::Errored);
            assert_eq!(results[2].outcome, CaseOutcome::Passed);
        }

        #[test]
        fn test_unknown_source_aborts_generation() {
            let registry = DataSourceRegistry::new();
            let case = DataDrivenCase::new("orphan", "nowhere", ParamSpec::new(["x"]));
            assert!(matches!(
                case.run_all(&registry, |_args| Ok(())),
                Err(CotejarError::UnknownDataSource { .. })
            ));
        }

        #[test]
        fn test_generated_case_exposes_binding_state() {
            let mut registry = DataSourceRegistry::new();
            registry.register_fn("one", || vec![DataRow::positional([ArgValue::from(1)])]);
            let case = DataDrivenCase::new("probe", "one", ParamSpec::new(["x", "y"]));
            let generated = case.generate(&registry).unwrap();
            assert_eq!(generated.len(), 1);
            assert!(!generated[0].is_bound());
        }
    }
}
