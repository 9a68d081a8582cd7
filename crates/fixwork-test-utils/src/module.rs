use fixwork_fixpoint::DataflowGraph;
use rustc_hash::FxHashMap;

use crate::ModuleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(usize);

#[derive(Clone, Debug)]
struct ValueInfo {
    name: String,
    definition: Option<OperationId>,
    uses: Vec<OperationId>,
}

#[derive(Clone, Debug)]
struct OperationInfo {
    name: String,
    operands: Vec<ValueId>,
    results: Vec<ValueId>,
}

/// A flat SSA module: named values, and operations reading and defining them.
///
/// Values are either results of exactly one operation or free (declared with
/// [`ModuleBuilder::free_value`]). Operands may refer to values defined later,
/// so loops can be expressed.
#[derive(Clone, Debug)]
pub struct Module {
    values: Vec<ValueInfo>,
    operations: Vec<OperationInfo>,
    by_name: FxHashMap<String, ValueId>,
}

impl Module {
    pub fn builder() -> ModuleBuilder {
        ModuleBuilder::default()
    }

    pub fn value(&self, name: &str) -> Option<ValueId> {
        self.by_name.get(name).copied()
    }

    pub fn value_name(&self, value: ValueId) -> &str {
        &self.values[value.0].name
    }

    pub fn operation_name(&self, operation: OperationId) -> &str {
        &self.operations[operation.0].name
    }

    pub fn operands(&self, operation: OperationId) -> &[ValueId] {
        &self.operations[operation.0].operands
    }

    pub fn results_of(&self, operation: OperationId) -> &[ValueId] {
        &self.operations[operation.0].results
    }

    pub fn value_count(&self) -> usize {
        self.values.len()
    }
}

impl DataflowGraph for Module {
    type Value = ValueId;
    type Operation = OperationId;

    fn values(&self) -> impl Iterator<Item = ValueId> {
        (0..self.values.len()).map(ValueId)
    }

    fn operations(&self) -> impl Iterator<Item = OperationId> {
        (0..self.operations.len()).map(OperationId)
    }

    fn defining_operation(&self, value: &ValueId) -> Option<OperationId> {
        self.values[value.0].definition
    }

    fn inputs(&self, operation: &OperationId) -> impl Iterator<Item = ValueId> {
        self.operations[operation.0].operands.iter().copied()
    }

    fn results(&self, operation: &OperationId) -> impl Iterator<Item = (usize, ValueId)> {
        self.operations[operation.0]
            .results
            .iter()
            .copied()
            .enumerate()
    }

    fn result_count(&self, operation: &OperationId) -> usize {
        self.operations[operation.0].results.len()
    }

    fn uses(&self, value: &ValueId) -> impl Iterator<Item = OperationId> {
        self.values[value.0].uses.iter().copied()
    }
}

#[derive(Clone, Debug)]
struct PendingOperation {
    name: String,
    results: Vec<String>,
    operands: Vec<String>,
}

/// Declarative builder for [`Module`]. Names are resolved in [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct ModuleBuilder {
    free: Vec<String>,
    operations: Vec<PendingOperation>,
}

impl ModuleBuilder {
    /// Declare a value no operation defines, e.g. a block argument.
    pub fn free_value(mut self, name: impl Into<String>) -> Self {
        self.free.push(name.into());
        self
    }

    /// Append `results = name(operands)`.
    pub fn operation(mut self, results: &[&str], name: &str, operands: &[&str]) -> Self {
        self.operations.push(PendingOperation {
            name: name.to_owned(),
            results: results.iter().map(|r| (*r).to_owned()).collect(),
            operands: operands.iter().map(|o| (*o).to_owned()).collect(),
        });
        self
    }

    pub fn build(self) -> Result<Module, ModuleError> {
        let mut values: Vec<ValueInfo> = Vec::new();
        let mut by_name: FxHashMap<String, ValueId> = FxHashMap::default();
        let mut define = |name: &str, definition: Option<OperationId>| {
            let id = ValueId(values.len());
            if by_name.insert(name.to_owned(), id).is_some() {
                return Err(ModuleError::DuplicateValue(name.to_owned()));
            }
            values.push(ValueInfo {
                name: name.to_owned(),
                definition,
                uses: Vec::new(),
            });
            Ok(id)
        };

        for name in &self.free {
            define(name, None)?;
        }
        let mut result_ids = Vec::with_capacity(self.operations.len());
        for (index, pending) in self.operations.iter().enumerate() {
            let ids = pending
                .results
                .iter()
                .map(|name| define(name, Some(OperationId(index))))
                .collect::<Result<Vec<_>, _>>()?;
            result_ids.push(ids);
        }

        let mut operations = Vec::with_capacity(self.operations.len());
        for (index, (pending, results)) in self.operations.into_iter().zip(result_ids).enumerate() {
            let mut operands = Vec::with_capacity(pending.operands.len());
            for operand in &pending.operands {
                let id = by_name
                    .get(operand)
                    .copied()
                    .ok_or_else(|| ModuleError::UnknownValue {
                        operation: pending.name.clone(),
                        value: operand.clone(),
                    })?;
                let uses = &mut values[id.0].uses;
                if !uses.contains(&OperationId(index)) {
                    uses.push(OperationId(index));
                }
                operands.push(id);
            }
            operations.push(OperationInfo {
                name: pending.name,
                operands,
                results,
            });
        }

        Ok(Module {
            values,
            operations,
            by_name,
        })
    }
}
