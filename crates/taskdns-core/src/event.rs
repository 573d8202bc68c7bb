// # Task State Change Event
//
// Model of the EventBridge "ECS Task State Change" event the function is
// invoked with. Only the fields the pipeline reads are required; the rest
// are kept optional and used for logging.
//
// ```json
// {
//   "id": "6f6c...",
//   "source": "aws.ecs",
//   "detail-type": "ECS Task State Change",
//   "detail": {
//     "clusterArn": "arn:aws:ecs:eu-west-1:123456789012:cluster/web",
//     "taskArn": "arn:aws:ecs:eu-west-1:123456789012:task/web/0a1b...",
//     "group": "service:api",
//     "lastStatus": "RUNNING",
//     "attachments": [
//       {
//         "id": "a3c1...",
//         "type": "eni",
//         "status": "ATTACHED",
//         "details": [
//           { "name": "subnetId", "value": "subnet-0abc" },
//           { "name": "networkInterfaceId", "value": "eni-0123456789abcdef0" }
//         ]
//       }
//     ]
//   }
// }
// ```

use serde::{Deserialize, Serialize};

/// Attachment type carrying the task's network interface
pub const ENI_ATTACHMENT_TYPE: &str = "eni";

/// Attachment detail holding the network interface id
pub const NETWORK_INTERFACE_ID_DETAIL: &str = "networkInterfaceId";

/// Separator between the ARN prefix and the cluster name
const CLUSTER_ARN_MARKER: &str = ":cluster/";

/// EventBridge envelope around a task description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStateChange {
    /// Event id assigned by EventBridge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Event source (e.g. "aws.ecs")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Event type (e.g. "ECS Task State Change")
    #[serde(
        rename = "detail-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detail_type: Option<String>,

    /// The task description
    pub detail: TaskDetail,
}

impl TaskStateChange {
    /// Parse an event from an untyped JSON payload
    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| crate::Error::invalid_event(format!("Malformed task event: {}", e)))
    }
}

/// Task description carried in the event's `detail` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    /// ARN of the cluster the task runs in
    pub cluster_arn: String,

    /// Task group, `<kind>:<name>` (e.g. "service:api")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Resources attached to the task, in delivery order
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// ARN of the task itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_arn: Option<String>,

    /// Last status reported by the agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,

    /// Status the scheduler is driving the task toward
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_status: Option<String>,
}

impl TaskDetail {
    /// Cluster name, taken from the cluster ARN
    ///
    /// `arn:aws:ecs:eu-west-1:123456789012:cluster/web` yields `web`.
    pub fn cluster_name(&self) -> crate::Result<&str> {
        match self.cluster_arn.split_once(CLUSTER_ARN_MARKER) {
            Some((_, name)) if !name.is_empty() => Ok(name),
            _ => Err(crate::Error::invalid_event(format!(
                "Cluster ARN has no cluster name: '{}'",
                self.cluster_arn
            ))),
        }
    }

    /// Service name, the second colon-separated segment of the task group
    ///
    /// `service:api` yields `api`. Fails when the event carries no group.
    pub fn service_name(&self) -> crate::Result<&str> {
        let Some(group) = self.group.as_deref() else {
            return Err(crate::Error::invalid_event("Task has no group"));
        };

        match group.split(':').nth(1) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(crate::Error::invalid_event(format!(
                "Task group has no service segment: '{}'",
                group
            ))),
        }
    }

    /// Id of the task's elastic network interface
    ///
    /// Looks at the first `eni` attachment only. Returns `None` when there is
    /// no such attachment or it carries no `networkInterfaceId` detail.
    pub fn network_interface_id(&self) -> Option<&str> {
        self.attachments
            .iter()
            .find(|attachment| attachment.kind == ENI_ATTACHMENT_TYPE)?
            .detail(NETWORK_INTERFACE_ID_DETAIL)
    }
}

/// A resource attached to the task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Attachment type (e.g. "eni")
    #[serde(rename = "type")]
    pub kind: String,

    /// Attachment status (e.g. "ATTACHED")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Name/value details, in delivery order
    pub details: Vec<AttachmentDetail>,
}

impl Attachment {
    /// Value of the first detail with the given name
    pub fn detail(&self, name: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|detail| detail.name == name)
            .map(|detail| detail.value.as_str())
    }
}

/// A single name/value detail of an attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDetail {
    pub name: String,
    pub value: String,
}

impl AttachmentDetail {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(cluster_arn: &str, group: &str, attachments: Vec<Attachment>) -> TaskDetail {
        TaskDetail {
            cluster_arn: cluster_arn.to_string(),
            group: Some(group.to_string()),
            attachments,
            task_arn: None,
            last_status: None,
            desired_status: None,
        }
    }

    fn attachment(kind: &str, details: Vec<AttachmentDetail>) -> Attachment {
        Attachment {
            id: None,
            kind: kind.to_string(),
            status: None,
            details,
        }
    }

    #[test]
    fn test_parse_eventbridge_payload() {
        let payload = json!({
            "version": "0",
            "id": "evt-1",
            "source": "aws.ecs",
            "detail-type": "ECS Task State Change",
            "region": "eu-west-1",
            "detail": {
                "clusterArn": "arn:aws:ecs:eu-west-1:123456789012:cluster/web",
                "taskArn": "arn:aws:ecs:eu-west-1:123456789012:task/web/abc",
                "group": "service:api",
                "lastStatus": "RUNNING",
                "desiredStatus": "RUNNING",
                "containers": [],
                "attachments": [{
                    "id": "att-1",
                    "type": "eni",
                    "status": "ATTACHED",
                    "details": [
                        { "name": "subnetId", "value": "subnet-0abc" },
                        { "name": "networkInterfaceId", "value": "eni-0123" }
                    ]
                }]
            }
        });

        let event = TaskStateChange::from_value(payload).unwrap();
        assert_eq!(event.detail_type.as_deref(), Some("ECS Task State Change"));
        assert_eq!(event.detail.cluster_name().unwrap(), "web");
        assert_eq!(event.detail.service_name().unwrap(), "api");
        assert_eq!(event.detail.network_interface_id(), Some("eni-0123"));
        assert_eq!(event.detail.last_status.as_deref(), Some("RUNNING"));
    }

    #[test]
    fn test_missing_required_field_is_invalid_event() {
        let payload = json!({
            "detail": {
                "group": "service:api",
                "attachments": []
            }
        });

        let err = TaskStateChange::from_value(payload).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidEvent(_)));
        assert!(err.to_string().contains("clusterArn"));
    }

    #[test]
    fn test_group_and_attachments_are_optional() {
        let payload = json!({
            "detail": {
                "clusterArn": "arn:aws:ecs:eu-west-1:123456789012:cluster/other"
            }
        });

        let event = TaskStateChange::from_value(payload).unwrap();
        assert_eq!(event.detail.cluster_name().unwrap(), "other");
        assert_eq!(event.detail.group, None);
        assert!(event.detail.attachments.is_empty());
        assert_eq!(event.detail.network_interface_id(), None);

        let err = event.detail.service_name().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidEvent(_)));
        assert!(err.to_string().contains("no group"));
    }

    #[test]
    fn test_cluster_name_from_arn() {
        let task = detail("arn:aws:ecs:us-east-1:1:cluster/prod-blue", "service:a", vec![]);
        assert_eq!(task.cluster_name().unwrap(), "prod-blue");

        let task = detail("arn:aws:ecs:us-east-1:1:cluster/", "service:a", vec![]);
        assert!(task.cluster_name().is_err());

        let task = detail("prod-blue", "service:a", vec![]);
        assert!(task.cluster_name().is_err());
    }

    #[test]
    fn test_service_name_is_second_segment() {
        let task = detail("arn:aws:ecs:r:1:cluster/c", "family:svc1", vec![]);
        assert_eq!(task.service_name().unwrap(), "svc1");

        let task = detail("arn:aws:ecs:r:1:cluster/c", "service:svc1:extra", vec![]);
        assert_eq!(task.service_name().unwrap(), "svc1");

        let task = detail("arn:aws:ecs:r:1:cluster/c", "svc1", vec![]);
        assert!(task.service_name().is_err());

        let task = detail("arn:aws:ecs:r:1:cluster/c", "service:", vec![]);
        assert!(task.service_name().is_err());
    }

    #[test]
    fn test_network_interface_id_uses_first_eni_attachment() {
        let task = detail(
            "arn:aws:ecs:r:1:cluster/c",
            "service:a",
            vec![
                attachment("elb", vec![AttachmentDetail::new("networkInterfaceId", "eni-elb")]),
                attachment("eni", vec![AttachmentDetail::new("networkInterfaceId", "eni-first")]),
                attachment("eni", vec![AttachmentDetail::new("networkInterfaceId", "eni-second")]),
            ],
        );
        assert_eq!(task.network_interface_id(), Some("eni-first"));
    }

    #[test]
    fn test_network_interface_id_missing() {
        let no_eni = detail(
            "arn:aws:ecs:r:1:cluster/c",
            "service:a",
            vec![attachment("elb", vec![])],
        );
        assert_eq!(no_eni.network_interface_id(), None);

        let no_detail = detail(
            "arn:aws:ecs:r:1:cluster/c",
            "service:a",
            vec![attachment("eni", vec![AttachmentDetail::new("subnetId", "subnet-1")])],
        );
        assert_eq!(no_detail.network_interface_id(), None);
    }
}
