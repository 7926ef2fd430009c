// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch orchestration: one inbound event in, ordered outbound actions out.
//!
//! Every user-facing error is caught here and converted to its short
//! [`RowboatError::user_message`] text; the technical detail goes to the log.
//! Events for the same user are serialized in arrival order through a
//! per-user async mutex held across the whole `handle` call.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use rowboat_catalog::{AccessResolver, Catalog};
use rowboat_core::{
    CallbackAction, Department, Event, Incoming, MenuButton, Outbound, RowboatError, ServiceDef,
    UserId,
};
use rowboat_export::{export, ExportFormat};
use rowboat_gateway::Gateway;

use crate::activity::ActivityTracker;
use crate::session::{SelectionState, SessionMap};

const PROCESSING_ACK: &str = "Processing your report, this may take a moment.";
const CHOOSE_SERVICE: &str = "Choose a service:";
const NO_SERVICES: &str = "No services are available.";
const NO_QUERIES: &str = "no queries available for this service";
const SERVICE_REPROMPT: &str = "No such service. Pick one from the menu or send its name.";
const NO_ACTIVITY: &str = "No activity yet.";

/// Routes parsed events through access control, the selection state machine,
/// the gateway, and the export pipeline.
pub struct Dispatcher {
    access: AccessResolver,
    catalog: Catalog,
    gateway: Gateway,
    sessions: SessionMap,
    activity: Arc<ActivityTracker>,
    compression_threshold: u64,
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl Dispatcher {
    pub fn new(
        access: AccessResolver,
        catalog: Catalog,
        gateway: Gateway,
        activity: Arc<ActivityTracker>,
        compression_threshold: u64,
    ) -> Self {
        Self {
            access,
            catalog,
            gateway,
            sessions: SessionMap::new(),
            activity,
            compression_threshold,
            locks: DashMap::new(),
        }
    }

    /// Handles one inbound event, returning outbound actions in delivery order.
    pub async fn handle(&self, incoming: Incoming) -> Vec<Outbound> {
        let lock = self
            .locks
            .entry(incoming.user)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _serialized = lock.lock().await;

        // Activity observation covers every message-borne event, authorized
        // or not; button presses are not messages and do not count.
        if let Some(text_len) = observed_len(&incoming.event) {
            self.activity
                .observe(
                    incoming.user,
                    incoming.chat,
                    incoming.chat_kind,
                    incoming.chat_title.as_deref(),
                    incoming.chat_topic.as_deref(),
                    text_len,
                )
                .await;
        }

        let Some(department) = self.access.department_of(incoming.user).cloned() else {
            warn!(user = incoming.user.0, "unauthorized access attempt");
            let err = RowboatError::Unauthorized {
                user: incoming.user,
            };
            return vec![Outbound::Reply(err.user_message().to_string())];
        };

        match incoming.event {
            Event::Start => self.on_start(incoming.user, &department),
            Event::MyStats => self.on_my_stats(incoming.user),
            Event::AllStats => self.on_all_stats(&department),
            Event::Text(text) => self.on_text(incoming.user, &department, &text),
            Event::Button(action) => self.on_button(incoming.user, action).await,
        }
    }

    fn on_start(&self, user: UserId, department: &Department) -> Vec<Outbound> {
        let services = self.catalog.services_for(department);
        if services.is_empty() {
            return vec![Outbound::Reply(NO_SERVICES.to_string())];
        }
        let buttons = services
            .iter()
            .map(|service| MenuButton::new(&service.name, format!("service:{}", service.id)))
            .collect();
        self.sessions.set(user, SelectionState::ServiceChosen);
        info!(user = user.0, services = services.len(), "service menu presented");
        vec![Outbound::Menu {
            text: CHOOSE_SERVICE.to_string(),
            buttons,
        }]
    }

    fn on_text(&self, user: UserId, department: &Department, text: &str) -> Vec<Outbound> {
        match self.sessions.state(user) {
            // Free text outside the selection flow is tracked, not answered.
            SelectionState::Idle => Vec::new(),
            SelectionState::ServiceChosen => {
                let wanted = text.trim();
                let matched = self
                    .catalog
                    .services_for(department)
                    .into_iter()
                    .find(|service| {
                        service.name.eq_ignore_ascii_case(wanted)
                            || service.id.eq_ignore_ascii_case(wanted)
                    });
                match matched {
                    Some(service) => {
                        self.sessions.reset(user);
                        self.query_menu(user, service)
                    }
                    None => vec![Outbound::Reply(SERVICE_REPROMPT.to_string())],
                }
            }
        }
    }

    async fn on_button(&self, user: UserId, action: CallbackAction) -> Vec<Outbound> {
        match action {
            CallbackAction::ServiceSelected(service_id) => self.on_browse(user, &service_id),
            CallbackAction::QuerySelected { service, key } => {
                // The acknowledgement always precedes the outcome, pass or fail.
                let mut out = vec![Outbound::Reply(PROCESSING_ACK.to_string())];
                let result = self.run_report(user, &service, &key).await;
                // A query callback always ends the selection, pass or fail.
                self.sessions.reset(user);
                out.push(result.unwrap_or_else(|e| {
                    log_dispatch_error(user, &service, &key, &e);
                    Outbound::Reply(e.user_message().to_string())
                }));
                out
            }
            CallbackAction::Unrecognized(payload) => {
                warn!(user = user.0, payload, "unrecognized callback payload");
                let err = RowboatError::NotFound {
                    what: format!("callback `{payload}`"),
                };
                vec![Outbound::Reply(err.user_message().to_string())]
            }
        }
    }

    fn on_browse(&self, user: UserId, service_id: &str) -> Vec<Outbound> {
        let Some(service) = self.catalog.service(service_id) else {
            warn!(user = user.0, service = service_id, "browse of unknown service");
            let err = RowboatError::NotFound {
                what: format!("service {service_id}"),
            };
            return vec![Outbound::Reply(err.user_message().to_string())];
        };
        if !self.access.can_access_service(user, service) {
            warn!(user = user.0, service = service_id, "forbidden service browse");
            let err = RowboatError::Forbidden {
                department: service
                    .department
                    .clone()
                    .unwrap_or_else(Department::admin),
                resource: format!("service {service_id}"),
            };
            return vec![Outbound::Reply(err.user_message().to_string())];
        }
        self.query_menu(user, service)
    }

    /// The stateless secondary menu: queries of one service, filtered to what
    /// the caller may run.
    fn query_menu(&self, user: UserId, service: &ServiceDef) -> Vec<Outbound> {
        let buttons: Vec<MenuButton> = service
            .queries
            .iter()
            .filter(|query| self.access.can_run_query(user, query))
            .map(|query| MenuButton::new(&query.name, format!("{}:{}", service.id, query.key)))
            .collect();
        if buttons.is_empty() {
            return vec![Outbound::Reply(NO_QUERIES.to_string())];
        }
        vec![Outbound::Menu {
            text: format!("Queries for {}:", service.name),
            buttons,
        }]
    }

    async fn run_report(
        &self,
        user: UserId,
        service_id: &str,
        key: &str,
    ) -> Result<Outbound, RowboatError> {
        let query = self.catalog.resolve(service_id, key)?;
        if !self.access.can_run_query(user, query) {
            return Err(RowboatError::Forbidden {
                department: query.department.clone(),
                resource: format!("query {service_id}:{key}"),
            });
        }

        let result = self.gateway.execute(query).await?;
        info!(
            user = user.0,
            service = service_id,
            query = key,
            rows = result.rows.len(),
            "query dispatched"
        );

        let base_name = format!("{service_id}_{key}");
        let file = export(
            &result,
            ExportFormat::Xlsx,
            &base_name,
            self.compression_threshold,
        )?;
        Ok(Outbound::Document {
            filename: file.filename,
            bytes: file.bytes,
            caption: format!("Report: {}", query.name),
        })
    }

    fn on_my_stats(&self, user: UserId) -> Vec<Outbound> {
        let summary = self.activity.summary_for(user);
        vec![Outbound::Reply(format!(
            "messages: {}, average length: {:.2}",
            summary.count, summary.average_length
        ))]
    }

    fn on_all_stats(&self, department: &Department) -> Vec<Outbound> {
        match self.activity.full_summary(department) {
            Ok(summaries) if summaries.is_empty() => {
                vec![Outbound::Reply(NO_ACTIVITY.to_string())]
            }
            Ok(summaries) => {
                let lines: Vec<String> = summaries
                    .iter()
                    .map(|s| {
                        format!(
                            "{}: messages: {}, average length: {:.2}",
                            s.user.0, s.count, s.average_length
                        )
                    })
                    .collect();
                vec![Outbound::Reply(lines.join("\n"))]
            }
            Err(e) => {
                warn!(department = %department, "forbidden full summary request");
                vec![Outbound::Reply(e.user_message().to_string())]
            }
        }
    }
}

/// Message length observed by the activity aggregator. Button presses are
/// not messages; commands count with their literal text length.
fn observed_len(event: &Event) -> Option<u64> {
    match event {
        Event::Text(text) => Some(text.chars().count() as u64),
        Event::Start => Some("/start".len() as u64),
        Event::MyStats => Some("/my_stats".len() as u64),
        Event::AllStats => Some("/all_stats".len() as u64),
        Event::Button(_) => None,
    }
}

fn log_dispatch_error(user: UserId, service: &str, key: &str, err: &RowboatError) {
    match err {
        RowboatError::NotFound { .. } => {
            warn!(user = user.0, service, key, error = %err, "stale or unknown query reference");
        }
        RowboatError::Forbidden { .. } | RowboatError::Unauthorized { .. } => {
            warn!(user = user.0, service, key, error = %err, "access denied");
        }
        _ => {
            error!(user = user.0, service, key, error = %err, "report dispatch failed");
        }
    }
}
