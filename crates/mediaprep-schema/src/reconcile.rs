use crate::capability::{Capability, CapabilitySets};
use crate::errors::SchemaError;
use crate::field_type::FieldType;
use crate::node::{Properties, SchemaNode, SCHEMA_DIALECT};
use mediaprep_canonical::{Canonicalizer, Digest, FieldPath, Warning, WarningCode};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Result of comparing a reconciled tree with the tree it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// The candidate is canonically identical to the input.
    NoChange,
    /// Some flag changed.
    Update(SchemaDiff),
}

impl ReconcileOutcome {
    /// True for [`ReconcileOutcome::NoChange`].
    pub fn is_no_change(&self) -> bool {
        matches!(self, ReconcileOutcome::NoChange)
    }
}

/// Minimal update produced by a reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDiff {
    /// Full candidate tree.
    pub properties: Properties,
    /// Sorted dotted paths whose own flags changed.
    pub changed_paths: Vec<String>,
    /// Fingerprint of the input tree.
    pub before: Digest,
    /// Fingerprint of the candidate tree.
    pub after: Digest,
}

impl SchemaDiff {
    /// Wraps the candidate as a schema document ready to be pushed.
    ///
    /// Union `type` declarations collapse to their primary type.
    pub fn to_update_payload(&self) -> Result<Value, SchemaError> {
        let mut properties = self.properties.clone();
        for node in properties.values_mut() {
            node.collapse_types();
        }
        Ok(json!({
            "$schema": SCHEMA_DIALECT,
            "type": "object",
            "properties": serde_json::to_value(&properties)?,
        }))
    }
}

/// Outcome plus the warnings collected on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Change or no change.
    pub outcome: ReconcileOutcome,
    /// One `incompatible_capability` warning per configured flag that the
    /// field's type cannot carry.
    pub warnings: Vec<Warning>,
}

/// Applies a capability configuration to schema trees.
#[derive(Debug, Clone)]
pub struct Reconciler {
    capabilities: CapabilitySets,
    canonicalizer: Canonicalizer,
}

impl Reconciler {
    /// Creates a reconciler for one capability configuration.
    pub fn new(capabilities: CapabilitySets) -> Self {
        Self {
            capabilities,
            canonicalizer: Canonicalizer::new(),
        }
    }

    /// The configuration in use.
    pub fn capabilities(&self) -> &CapabilitySets {
        &self.capabilities
    }

    /// Computes the flags for every node of `current` and diffs the result.
    pub fn reconcile(&self, current: &Properties) -> Result<Reconciliation, SchemaError> {
        let mut candidate = current.clone();
        let mut warnings = Vec::new();
        self.annotate_properties(&mut candidate, &FieldPath::root(), &mut warnings);

        let before_bytes = self.canonicalizer.canonicalize_serialize(current)?;
        let after_bytes = self.canonicalizer.canonicalize_serialize(&candidate)?;

        if before_bytes == after_bytes {
            info!(fields = current.len(), "schema already matches capability configuration");
            return Ok(Reconciliation {
                outcome: ReconcileOutcome::NoChange,
                warnings,
            });
        }

        let mut changed = BTreeSet::new();
        collect_changes(current, &candidate, &FieldPath::root(), &mut changed);
        let diff = SchemaDiff {
            properties: candidate,
            changed_paths: changed.into_iter().collect(),
            before: Digest::sha256(&before_bytes),
            after: Digest::sha256(&after_bytes),
        };
        info!(
            changed = diff.changed_paths.len(),
            before = %diff.before,
            after = %diff.after,
            "schema capability update computed"
        );
        Ok(Reconciliation {
            outcome: ReconcileOutcome::Update(diff),
            warnings,
        })
    }

    fn annotate_properties(
        &self,
        properties: &mut Properties,
        parent: &FieldPath,
        warnings: &mut Vec<Warning>,
    ) {
        for (name, node) in properties.iter_mut() {
            let path = parent.child(name);
            match node.primary_type() {
                Some(FieldType::Object) => {
                    self.annotate_node(node, &path, true, warnings);
                    if let Some(children) = node.properties.as_mut() {
                        self.annotate_properties(children, &path, warnings);
                    }
                }
                Some(FieldType::Array) => {
                    // Settings configured on an array belong to its elements.
                    let has_items = node.items.is_some();
                    self.annotate_node(node, &path, !has_items, warnings);
                    if let Some(items) = node.items.as_mut() {
                        self.annotate_node(items, &path, true, warnings);
                        if let Some(children) = items.properties.as_mut() {
                            self.annotate_properties(children, &path, warnings);
                        }
                    }
                }
                _ => self.annotate_node(node, &path, true, warnings),
            }
        }
    }

    fn annotate_node(
        &self,
        node: &mut SchemaNode,
        path: &FieldPath,
        report_incompatible: bool,
        warnings: &mut Vec<Warning>,
    ) {
        let field_type = node.primary_type();
        let is_title = node.is_title();

        for capability in Capability::ALL {
            let wanted = self.capabilities.contains(capability, path.as_str());
            let compatible = field_type
                .as_ref()
                .is_some_and(|t| capability.accepts(t));
            if !compatible {
                if wanted && report_incompatible {
                    let declared = field_type
                        .as_ref()
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "untyped".to_string());
                    warnings.push(Warning::new(
                        WarningCode::IncompatibleCapability,
                        path.as_str(),
                        format!("{} field cannot be {}", declared, capability),
                    ));
                }
                continue;
            }
            if is_title && matches!(capability, Capability::Searchable | Capability::Indexable) {
                continue;
            }
            if node.flag(capability) != Some(wanted) {
                debug!(field = %path, capability = %capability, value = wanted, "setting capability");
            }
            node.set_flag(capability, wanted);
        }

        let indexable_ok = field_type
            .as_ref()
            .is_some_and(|t| Capability::Indexable.accepts(t));
        if node.dynamic_facetable == Some(true) && indexable_ok && !is_title {
            node.set_flag(Capability::Indexable, true);
        }
    }
}

fn flags_differ(before: &SchemaNode, after: &SchemaNode) -> bool {
    Capability::ALL
        .iter()
        .any(|capability| before.flag(*capability) != after.flag(*capability))
}

fn collect_changes(
    before: &Properties,
    after: &Properties,
    parent: &FieldPath,
    out: &mut BTreeSet<String>,
) {
    for (name, after_node) in after {
        let path = parent.child(name);
        let Some(before_node) = before.get(name) else {
            out.insert(path.as_str().to_string());
            continue;
        };
        if flags_differ(before_node, after_node) {
            out.insert(path.as_str().to_string());
        }
        if let (Some(b), Some(a)) = (&before_node.properties, &after_node.properties) {
            collect_changes(b, a, &path, out);
        }
        if let (Some(b), Some(a)) = (&before_node.items, &after_node.items) {
            if flags_differ(b, a) {
                out.insert(path.as_str().to_string());
            }
            if let (Some(bp), Some(ap)) = (&b.properties, &a.properties) {
                collect_changes(bp, ap, &path, out);
            }
        }
    }
}
