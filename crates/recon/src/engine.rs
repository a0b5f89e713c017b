use crate::blob::FieldExtractor;
use crate::classify::{classify, RoleCodes};
use crate::config::RunConfig;
use crate::error::ReconError;
use crate::group::normalize_group;
use crate::matcher::EntityResolver;
use crate::model::{EventRow, EventTable, ReconInput, ReconMeta, ReconResult, ResolvedEvent};
use crate::summary::compute_summary;

/// Extraction and resolution settings, validated once up front.
#[derive(Debug, Clone)]
pub struct Pipeline {
    role_field: FieldExtractor,
    group_field: FieldExtractor,
    codes: RoleCodes,
    cutoff: f64,
}

impl Pipeline {
    pub fn new(
        role_field_id: &str,
        group_field_id: &str,
        codes: RoleCodes,
        cutoff: f64,
    ) -> Result<Self, ReconError> {
        if !cutoff.is_finite() || !(0.0..=1.0).contains(&cutoff) {
            return Err(ReconError::CutoffOutOfRange(cutoff));
        }
        let role_field = FieldExtractor::new(role_field_id).map_err(|_| ReconError::InvalidFieldId {
            field: "role".into(),
            value: role_field_id.into(),
        })?;
        let group_field = FieldExtractor::new(group_field_id).map_err(|_| ReconError::InvalidFieldId {
            field: "group".into(),
            value: group_field_id.into(),
        })?;
        if role_field.field_id() == group_field.field_id() {
            return Err(ReconError::ConfigValidation(format!(
                "role and group fields must differ, both are '{}'",
                role_field.field_id()
            )));
        }

        Ok(Self {
            role_field,
            group_field,
            codes,
            cutoff,
        })
    }

    pub fn from_config(config: &RunConfig) -> Result<Self, ReconError> {
        config.validate()?;
        Self::new(
            &config.fields.role,
            &config.fields.group,
            config.codes.clone(),
            config.cutoff,
        )
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Derive role, group, and match for one event.
    pub fn resolve_event(
        &self,
        index: usize,
        row: &EventRow,
        resolver: &EntityResolver<'_>,
    ) -> ResolvedEvent {
        let blob = row.custom_field_blob.as_deref();

        let answer = self.role_field.extract(blob);
        let role = classify(answer.as_deref());
        let role_code = self.codes.code_of(role).map(String::from);

        let group = normalize_group(blob, &self.group_field);
        let resolution = resolver.resolve(group.as_deref());

        ResolvedEvent {
            index,
            values: row.values.clone(),
            role,
            role_code,
            group,
            resolution,
        }
    }

    /// One augmented record per event, in input order.
    pub fn process(&self, events: &EventTable, reference: &[String]) -> Vec<ResolvedEvent> {
        let resolver = EntityResolver::new(reference, self.cutoff);
        events
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.resolve_event(i, row, &resolver))
            .collect()
    }
}

/// Keep records that have both a role and a match. No deduplication.
pub fn filter_exportable(records: &[ResolvedEvent]) -> Vec<ResolvedEvent> {
    records.iter().filter(|r| r.is_exportable()).cloned().collect()
}

/// Run extraction, resolution, and filtering per config.
pub fn run(config: &RunConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let pipeline = Pipeline::from_config(config)?;

    tracing::info!(
        events = input.events.rows.len(),
        reference = input.reference.len(),
        cutoff = pipeline.cutoff,
        "running reconciliation '{}'",
        config.name
    );

    let records = pipeline.process(&input.events, &input.reference);
    let output = filter_exportable(&records);
    let summary = compute_summary(&records);

    tracing::debug!(
        matched = summary.matched,
        below_cutoff = summary.below_cutoff,
        exported = summary.exported,
        "reconciliation finished"
    );

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            cutoff: pipeline.cutoff,
            role_field: pipeline.role_field.field_id().to_string(),
            group_field: pipeline.group_field.field_id().to_string(),
            reference_size: input.reference.len(),
        },
        summary,
        headers: input.events.headers.clone(),
        records,
        output,
    })
}
