//! Built-in system-information tools.
//!
//! These are the default capabilities bundled with every agent created
//! through the FFI boundary: CPU load, memory pressure, disk usage, and a
//! host summary, all read through the `sysinfo` crate.

use super::error::ToolError;
use super::registry::Tool;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use sysinfo::{Disks, System};
use tokio::sync::Mutex;

fn empty_object_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

fn to_json_text(tool: &str, value: &Value) -> Result<String, ToolError> {
    serde_json::to_string(value).map_err(|e| ToolError::invocation(tool, e.to_string()))
}

/// All built-in tools, in a fixed order.
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    let system = Arc::new(Mutex::new(System::new_all()));
    vec![
        Arc::new(CpuUsageTool {
            system: system.clone(),
        }),
        Arc::new(MemoryUsageTool { system }),
        Arc::new(DiskUsageTool),
        Arc::new(SystemSummaryTool),
    ]
}

pub struct CpuUsageTool {
    system: Arc<Mutex<System>>,
}

#[async_trait]
impl Tool for CpuUsageTool {
    fn name(&self) -> &str {
        "cpu_usage"
    }

    fn description(&self) -> &str {
        "Report the current global CPU usage as a percentage"
    }

    fn parameters(&self) -> Value {
        empty_object_schema()
    }

    async fn invoke(&self, _arguments: Value) -> Result<String, ToolError> {
        let mut system = self.system.lock().await;
        // Two refreshes separated by the minimum interval, otherwise the
        // reading is always zero.
        system.refresh_cpu_usage();
        tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
        system.refresh_cpu_usage();

        let payload = json!({
            "global_usage_percent": round1(system.global_cpu_usage()),
            "core_count": system.cpus().len(),
        });
        to_json_text(self.name(), &payload)
    }
}

pub struct MemoryUsageTool {
    system: Arc<Mutex<System>>,
}

#[async_trait]
impl Tool for MemoryUsageTool {
    fn name(&self) -> &str {
        "memory_usage"
    }

    fn description(&self) -> &str {
        "Report total, used, and available memory in bytes"
    }

    fn parameters(&self) -> Value {
        empty_object_schema()
    }

    async fn invoke(&self, _arguments: Value) -> Result<String, ToolError> {
        let mut system = self.system.lock().await;
        system.refresh_memory();

        let payload = json!({
            "total_bytes": system.total_memory(),
            "used_bytes": system.used_memory(),
            "available_bytes": system.available_memory(),
            "total_swap_bytes": system.total_swap(),
            "used_swap_bytes": system.used_swap(),
        });
        to_json_text(self.name(), &payload)
    }
}

pub struct DiskUsageTool;

#[async_trait]
impl Tool for DiskUsageTool {
    fn name(&self) -> &str {
        "disk_usage"
    }

    fn description(&self) -> &str {
        "List mounted disks with total and available space, optionally filtered by mount point"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "mount_point": {
                    "type": "string",
                    "description": "Filter results by mount point path (partial match)"
                }
            }
        })
    }

    async fn invoke(&self, arguments: Value) -> Result<String, ToolError> {
        let filter = match &arguments {
            Value::Null => None,
            Value::Object(map) => map
                .get("mount_point")
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| {
                        ToolError::InvalidArguments {
                            tool: self.name().to_string(),
                            reason: "mount_point must be a string".to_string(),
                        }
                    })
                })
                .transpose()?,
            _ => {
                return Err(ToolError::InvalidArguments {
                    tool: self.name().to_string(),
                    reason: "expected an arguments object".to_string(),
                });
            }
        };

        let disks = Disks::new_with_refreshed_list();
        let entries: Vec<Value> = disks
            .iter()
            .filter(|disk| {
                filter
                    .as_deref()
                    .is_none_or(|needle| disk.mount_point().to_string_lossy().contains(needle))
            })
            .map(|disk| {
                json!({
                    "name": disk.name().to_string_lossy(),
                    "mount_point": disk.mount_point().to_string_lossy(),
                    "total_bytes": disk.total_space(),
                    "available_bytes": disk.available_space(),
                })
            })
            .collect();

        to_json_text(self.name(), &json!({ "disks": entries }))
    }
}

pub struct SystemSummaryTool;

#[async_trait]
impl Tool for SystemSummaryTool {
    fn name(&self) -> &str {
        "system_summary"
    }

    fn description(&self) -> &str {
        "Report OS name and version, kernel, hostname, and uptime in seconds"
    }

    fn parameters(&self) -> Value {
        empty_object_schema()
    }

    async fn invoke(&self, _arguments: Value) -> Result<String, ToolError> {
        let payload = json!({
            "os_name": System::name(),
            "os_version": System::os_version(),
            "kernel_version": System::kernel_version(),
            "hostname": System::host_name(),
            "uptime_secs": System::uptime(),
        });
        to_json_text(self.name(), &payload)
    }
}

fn round1(value: f32) -> f64 {
    (f64::from(value) * 10.0).round() / 10.0
}
