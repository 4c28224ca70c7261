use super::binding::{TraitBinding, TraitContext};
use super::{StackRow, TraitDef, TraitError, TraitResult, TraitValue};
use crate::component::Component;
use crate::registry::{Blueprint, RegistryResult};

/// Maps stack rows onto child components of one type.
///
/// Row `id` lives in `id_attribute` of each child, row `label` is the
/// child's text.
#[derive(Debug, Clone)]
pub struct ChildListBinding {
    pub child_type: String,
    pub id_attribute: String,
}

impl ChildListBinding {
    pub fn new(child_type: impl Into<String>, id_attribute: impl Into<String>) -> Self {
        Self {
            child_type: child_type.into(),
            id_attribute: id_attribute.into(),
        }
    }

    fn row_blueprint(&self, row: &StackRow) -> Blueprint {
        Blueprint::new(self.child_type.clone())
            .attribute(self.id_attribute.clone(), row.id.clone())
            .text(row.label.clone())
    }
}

impl TraitBinding for ChildListBinding {
    fn get_value(&self, _trait_def: &TraitDef, component: &Component) -> TraitValue {
        let rows = component
            .children
            .iter()
            .filter(|c| !c.is_content_node())
            .map(|child| StackRow {
                id: child
                    .get_attribute(&self.id_attribute)
                    .unwrap_or_default()
                    .to_string(),
                label: child.text_content(),
            })
            .collect();
        TraitValue::Rows(rows)
    }

    fn set_value(&self, ctx: &mut TraitContext<'_>, value: TraitValue) -> TraitResult<()> {
        let rows = match value {
            TraitValue::Rows(rows) => rows,
            _ => {
                return Err(TraitError::type_mismatch(
                    ctx.trait_def.name.clone(),
                    "row list",
                ))
            }
        };

        // Build every child before touching the component
        let children = rows
            .iter()
            .map(|row| ctx.registry.instantiate(&self.row_blueprint(row)))
            .collect::<RegistryResult<Vec<_>>>()?;

        ctx.component.replace_children(children);
        ctx.registry.adopt_children(ctx.component);
        ctx.emit_update();
        Ok(())
    }
}
