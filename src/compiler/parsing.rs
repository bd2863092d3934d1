use crate::definition::ConditionDefinition;
use crate::error::TaskBuildError;
use crate::task::Condition;
use ahash::AHashMap;

/// Defines the contract for parsing a specific `condition_type` into a `Condition`.
///
/// `children` holds the already-parsed nested conditions, in order.
pub trait ConditionParser: Send + Sync {
    fn condition_type(&self) -> &str;
    fn parse(
        &self,
        section_id: &str,
        definition: &ConditionDefinition,
        children: Vec<Condition>,
    ) -> Result<Condition, TaskBuildError>;
}

fn malformed(section_id: &str, type_name: &str, message: String) -> TaskBuildError {
    TaskBuildError::MalformedCondition {
        section_id: section_id.to_string(),
        type_name: type_name.to_string(),
        message,
    }
}

/// Helper to extract the `key`/`value` pair of a leaf condition.
fn require_leaf<'d>(
    section_id: &str,
    definition: &'d ConditionDefinition,
    children: &[Condition],
) -> Result<(&'d str, &'d str), TaskBuildError> {
    let type_name = definition.condition_type.as_str();
    if !children.is_empty() {
        return Err(malformed(
            section_id,
            type_name,
            format!(
                "{} takes no nested conditions, but received {}",
                type_name,
                children.len()
            ),
        ));
    }
    let key = definition
        .key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| malformed(section_id, type_name, "missing 'key'".to_string()))?;
    let value = definition
        .value
        .as_deref()
        .ok_or_else(|| malformed(section_id, type_name, "missing 'value'".to_string()))?;
    Ok((key, value))
}

/// Helper to check the number of nested conditions of a composite.
fn require_children(
    section_id: &str,
    type_name: &str,
    children: Vec<Condition>,
    exactly: Option<usize>,
) -> Result<Vec<Condition>, TaskBuildError> {
    match exactly {
        Some(count) if children.len() != count => Err(malformed(
            section_id,
            type_name,
            format!(
                "{} requires {} nested conditions, but received {}",
                type_name,
                count,
                children.len()
            ),
        )),
        None if children.is_empty() => Err(malformed(
            section_id,
            type_name,
            format!("{} requires at least one nested condition", type_name),
        )),
        _ => Ok(children),
    }
}

struct IncludesParser;
impl ConditionParser for IncludesParser {
    fn condition_type(&self) -> &str {
        "includes"
    }
    fn parse(
        &self,
        section_id: &str,
        definition: &ConditionDefinition,
        children: Vec<Condition>,
    ) -> Result<Condition, TaskBuildError> {
        let (key, tag) = require_leaf(section_id, definition, &children)?;
        Ok(Condition::includes(key, tag))
    }
}

struct EqualsParser;
impl ConditionParser for EqualsParser {
    fn condition_type(&self) -> &str {
        "equals"
    }
    fn parse(
        &self,
        section_id: &str,
        definition: &ConditionDefinition,
        children: Vec<Condition>,
    ) -> Result<Condition, TaskBuildError> {
        let (key, value) = require_leaf(section_id, definition, &children)?;
        Ok(Condition::equals(key, value))
    }
}

struct NotParser;
impl ConditionParser for NotParser {
    fn condition_type(&self) -> &str {
        "not"
    }
    fn parse(
        &self,
        section_id: &str,
        _definition: &ConditionDefinition,
        children: Vec<Condition>,
    ) -> Result<Condition, TaskBuildError> {
        let mut children = require_children(section_id, "not", children, Some(1))?;
        Ok(Condition::Not(Box::new(children.remove(0))))
    }
}

struct AllParser;
impl ConditionParser for AllParser {
    fn condition_type(&self) -> &str {
        "all"
    }
    fn parse(
        &self,
        section_id: &str,
        _definition: &ConditionDefinition,
        children: Vec<Condition>,
    ) -> Result<Condition, TaskBuildError> {
        require_children(section_id, "all", children, None).map(Condition::All)
    }
}

struct AnyParser;
impl ConditionParser for AnyParser {
    fn condition_type(&self) -> &str {
        "any"
    }
    fn parse(
        &self,
        section_id: &str,
        _definition: &ConditionDefinition,
        children: Vec<Condition>,
    ) -> Result<Condition, TaskBuildError> {
        require_children(section_id, "any", children, None).map(Condition::Any)
    }
}

pub(super) fn register_default_parsers(registry: &mut AHashMap<String, Box<dyn ConditionParser>>) {
    for parser in [
        Box::new(IncludesParser) as Box<dyn ConditionParser>,
        Box::new(EqualsParser),
        Box::new(NotParser),
        Box::new(AllParser),
        Box::new(AnyParser),
    ] {
        registry.insert(parser.condition_type().to_string(), parser);
    }
}

/// Creates a built-in parser by its condition type name.
pub(super) fn create_parser_by_name(name: &str) -> Option<Box<dyn ConditionParser>> {
    match name {
        "includes" => Some(Box::new(IncludesParser)),
        "equals" => Some(Box::new(EqualsParser)),
        "not" => Some(Box::new(NotParser)),
        "all" => Some(Box::new(AllParser)),
        "any" => Some(Box::new(AnyParser)),
        _ => None,
    }
}
