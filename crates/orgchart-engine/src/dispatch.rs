//! JSON-RPC 2.0 dispatch over the org chart API.
//!
//! Provides the following methods:
//! - `org.get_all()` - All employees in roster order
//! - `org.get(id)` - One employee, or `null`
//! - `org.direct_reports(id)` - Immediate reports
//! - `org.subordinates(id)` - Everyone below an employee
//! - `org.ancestor_chain(id)` - Managers up to the root
//! - `org.level_of(id)` - Depth below the root, or `null`
//! - `org.roots()` - Employees with no (resolvable) manager
//! - `org.orphans()` - Employees whose manager was removed
//! - `org.team_related_set(team)` - A team plus its managers and reports
//! - `org.teams()` - Team names with headcounts
//! - `org.search(query)` - Case-insensitive filter
//! - `org.highlight(text, query)` - Split text into matching segments
//! - `org.layout(team?)` - Level layout of the chart
//! - `org.propose_reassignment(employeeId, managerId?)` - Validated manager change
//! - `org.create(employee)` - Add an employee
//! - `org.update(id, patch)` - Partially update an employee
//! - `org.remove(id)` - Remove an employee
//!
//! The dispatcher owns no transport. `serve` speaks newline-delimited
//! requests over any reader/writer pair; each line in is a request and
//! each line out is its response.

use std::io::{BufRead, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use orgchart_protocol::*;

use crate::engine::{EngineError, OrgChart};

/// Process a single raw request line and return a response.
pub fn process_request(chart: &mut OrgChart, request_str: &str) -> OrgResponse {
    let request: OrgRequest = match serde_json::from_str(request_str) {
        Ok(r) => r,
        Err(e) => {
            return OrgResponse::error(None, PARSE_ERROR, ProtocolError::from(e).to_string());
        }
    };

    dispatch(chart, request)
}

/// Route a parsed request to its handler.
pub fn dispatch(chart: &mut OrgChart, request: OrgRequest) -> OrgResponse {
    let id = request.id;
    let params = &request.params;

    tracing::debug!(method = %request.method, "Dispatching request");

    match request.method.as_str() {
        "org.get_all" => respond(id, &chart.get_all()),
        "org.get" => handle_get(id, params, chart),
        "org.direct_reports" => with_params(id, params, |id, p: EmployeeParams| {
            respond(id, &chart.direct_reports(p.id.as_str()))
        }),
        "org.subordinates" => with_params(id, params, |id, p: EmployeeParams| {
            respond(id, &chart.subordinate_closure(p.id.as_str()))
        }),
        "org.ancestor_chain" => with_params(id, params, |id, p: EmployeeParams| {
            respond(id, &chart.ancestor_chain(p.id.as_str()))
        }),
        "org.level_of" => with_params(id, params, |id, p: EmployeeParams| {
            respond(id, &chart.level_of(p.id.as_str()))
        }),
        "org.roots" => respond(id, &chart.roots()),
        "org.orphans" => respond(id, &chart.orphans()),
        "org.team_related_set" => with_params(id, params, |id, p: TeamParams| {
            respond(id, &chart.team_related_set(&p.team))
        }),
        "org.teams" => respond(id, &chart.team_summaries()),
        "org.search" => with_params(id, params, |id, p: SearchParams| {
            respond(id, &chart.search(&p.query))
        }),
        "org.highlight" => with_params(id, params, |id, p: HighlightParams| {
            respond(id, &chart.highlight_spans(&p.text, &p.query))
        }),
        "org.layout" => handle_layout(id, params, chart),
        "org.propose_reassignment" => handle_propose_reassignment(id, params, chart),
        "org.create" => handle_create(id, params, chart),
        "org.update" => handle_update(id, params, chart),
        "org.remove" => handle_remove(id, params, chart),
        _ => OrgResponse::error(
            id,
            METHOD_NOT_FOUND,
            ProtocolError::UnknownMethod(request.method.clone()).to_string(),
        ),
    }
}

/// Serve newline-delimited requests until the reader is exhausted.
///
/// Blank lines are skipped. Returns the number of requests answered.
pub fn serve<R: BufRead, W: Write>(
    chart: &mut OrgChart,
    reader: R,
    mut writer: W,
) -> Result<usize, anyhow::Error> {
    let mut handled = 0;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = process_request(chart, &line);
        let response_json = serde_json::to_string(&response)?;
        writer.write_all(response_json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }

    tracing::debug!(handled, "Request stream closed");
    Ok(handled)
}

/// Handle `org.get` - an unknown id yields a `null` result.
fn handle_get(id: Option<String>, params: &serde_json::Value, chart: &OrgChart) -> OrgResponse {
    with_params(id, params, |id, p: EmployeeParams| {
        respond(id, &chart.get(p.id.as_str()))
    })
}

/// Handle `org.layout` - params are optional.
fn handle_layout(id: Option<String>, params: &serde_json::Value, chart: &OrgChart) -> OrgResponse {
    let p = if params.is_null() {
        LayoutParams::default()
    } else {
        match parse_params::<LayoutParams>(params) {
            Ok(p) => p,
            Err(e) => return OrgResponse::error(id, INVALID_PARAMS, e.to_string()),
        }
    };
    respond(id, &chart.layout(p.team.as_deref()))
}

/// Handle `org.propose_reassignment`.
///
/// A rejection is a normal outcome: it comes back as a successful
/// response with `accepted: false` and the user-facing message.
fn handle_propose_reassignment(
    id: Option<String>,
    params: &serde_json::Value,
    chart: &mut OrgChart,
) -> OrgResponse {
    with_params(id, params, |id, p: ReassignParams| {
        let outcome = chart.propose_reassignment(
            p.employee_id.as_str(),
            p.manager_id.as_ref().map(EmployeeId::as_str),
        );
        respond(id, &outcome.to_result())
    })
}

/// Handle `org.create`.
fn handle_create(
    id: Option<String>,
    params: &serde_json::Value,
    chart: &mut OrgChart,
) -> OrgResponse {
    with_params(id, params, |id, p: CreateParams| match chart.create(p.employee) {
        Ok(employee) => respond(id, &employee),
        Err(e) => engine_error(id, e),
    })
}

/// Handle `org.update`.
fn handle_update(
    id: Option<String>,
    params: &serde_json::Value,
    chart: &mut OrgChart,
) -> OrgResponse {
    with_params(id, params, |id, p: UpdateParams| {
        match chart.update(p.id.as_str(), p.patch) {
            Ok(employee) => respond(id, &employee),
            Err(e) => engine_error(id, e),
        }
    })
}

/// Handle `org.remove` - removing an unknown id is not an error.
fn handle_remove(
    id: Option<String>,
    params: &serde_json::Value,
    chart: &mut OrgChart,
) -> OrgResponse {
    with_params(id, params, |id, p: EmployeeParams| {
        let removed = chart.remove(p.id.as_str());
        OrgResponse::success(
            id,
            serde_json::json!({
                "removed": removed.is_some(),
                "employee": removed,
            }),
        )
    })
}

// ── Helpers ──

fn parse_params<T: DeserializeOwned>(params: &serde_json::Value) -> Result<T, ProtocolError> {
    serde_json::from_value(params.clone())
        .map_err(|e| ProtocolError::InvalidMessage(format!("invalid params: {}", e)))
}

fn with_params<T, F>(id: Option<String>, params: &serde_json::Value, handler: F) -> OrgResponse
where
    T: DeserializeOwned,
    F: FnOnce(Option<String>, T) -> OrgResponse,
{
    match parse_params(params) {
        Ok(p) => handler(id, p),
        Err(e) => OrgResponse::error(id, INVALID_PARAMS, e.to_string()),
    }
}

fn respond<T: Serialize + ?Sized>(id: Option<String>, value: &T) -> OrgResponse {
    match serde_json::to_value(value) {
        Ok(result) => OrgResponse::success(id, result),
        Err(e) => OrgResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e)),
    }
}

fn engine_error(id: Option<String>, error: EngineError) -> OrgResponse {
    let code = match &error {
        EngineError::EmployeeNotFound(_) => EMPLOYEE_NOT_FOUND,
        EngineError::Hierarchy(_) => WRITE_REFUSED,
        EngineError::IdExhausted(_) | EngineError::State(_) => INTERNAL_ERROR,
    };
    OrgResponse::error(id, code, error.to_string())
}
