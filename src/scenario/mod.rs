//! Load tables into decision-optimization scenarios
//!
//! The framework client is an injected capability: callers hand in any
//! [`ScenarioFramework`] implementation and this module drives the
//! replace-and-load flow against it. Protocol, auth, and transport live
//! entirely behind the trait.

use anyhow::Result;
use indexmap::IndexMap;

use crate::table::Table;

/// Category label used for input tables.
pub const DEFAULT_CATEGORY: &str = "input";

/// Client surface of the decision-optimization framework.
pub trait ScenarioFramework {
    /// Scenario container handle produced by this framework
    type Container: ScenarioContainer;

    /// Look up an existing scenario by name
    fn get_scenario(&mut self, name: &str) -> Result<Option<Self::Container>>;

    /// Delete a scenario container and everything in it
    fn delete_container(&mut self, container: Self::Container) -> Result<()>;

    /// Create a new, empty scenario
    fn create_scenario(&mut self, name: &str) -> Result<Self::Container>;
}

/// A named data bucket inside the framework, holding table data under
/// category labels.
pub trait ScenarioContainer {
    /// Add one table's data under the given category, keyed by table name
    fn add_table_data(&mut self, table_name: &str, table: &Table, category: &str) -> Result<()>;
}

/// Replace any existing scenario of this name with a blank instance.
///
/// Callers never need to pre-check existence; the returned container is
/// empty either way.
pub fn replace_scenario<F: ScenarioFramework>(
    framework: &mut F,
    name: &str,
) -> Result<F::Container> {
    if let Some(existing) = framework.get_scenario(name)? {
        log::info!("Deleting existing scenario '{}'", name);
        framework.delete_container(existing)?;
    }
    framework.create_scenario(name)
}

/// Load tables into a scenario, one at a time, keyed by table name.
///
/// No batching and no rollback: tables added before a failure stay
/// committed in the scenario, and the error propagates to the caller.
pub fn load_scenario_tables<C: ScenarioContainer>(
    container: &mut C,
    tables: &IndexMap<String, Table>,
    category: &str,
) -> Result<()> {
    for (table_name, table) in tables {
        container.add_table_data(table_name, table, category)?;
        log::debug!("Added table '{}' under category '{}'", table_name, category);
    }
    Ok(())
}
