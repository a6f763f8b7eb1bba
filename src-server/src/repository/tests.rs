//! Repository Integration Tests
//!
//! Every repository against an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::*;
    use crate::repository::{init_db, Repositories, Repository};
    use std::path::PathBuf;

    async fn setup_test_db() -> Repositories {
        let db_state = init_db(&PathBuf::from(":memory:")).await.expect("Failed to init test DB");
        Repositories::new(&db_state)
    }

    fn action_item(title: &str, party: &str, status: ActionStatus, priority: Priority) -> ActionItem {
        ActionItem {
            id: 0,
            title: title.to_string(),
            description: String::new(),
            responsible_party: party.to_string(),
            target_date: "2026-02-01".to_string(),
            status,
            priority,
            meeting_id: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn deliverable(name: &str, phase_id: u8) -> Deliverable {
        Deliverable {
            id: 0,
            name: name.to_string(),
            description: String::new(),
            due_date: "2026-03-31".to_string(),
            owner: Owner::Partner,
            status: DeliverableStatus::InProgress,
            completion_percentage: 40.0,
            phase_id,
            evidence: vec!["report.pdf".to_string()],
            comments: None,
            updated_at: None,
        }
    }

    fn metric(name: &str, current: f64, target: f64) -> Metric {
        Metric {
            id: 0,
            name: name.to_string(),
            current,
            target,
            unit: "percent".to_string(),
            notes: String::new(),
            updated_at: None,
        }
    }

    fn post(title: &str, update_type: UpdateType, created_at: &str) -> Update {
        Update {
            id: 0,
            update_type,
            title: title.to_string(),
            content: "body".to_string(),
            author: "pm".to_string(),
            author_email: "pm@example.com".to_string(),
            priority: UpdatePriority::Normal,
            created_at: created_at.to_string(),
            acknowledgements: vec![],
        }
    }

    // ========================
    // Action items
    // ========================

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let repos = setup_test_db().await;

        let first = repos.action_items.create(&action_item("a", "Client", ActionStatus::Pending, Priority::Low)).await.unwrap();
        let second = repos.action_items.create(&action_item("b", "Client", ActionStatus::Pending, Priority::Low)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.created_at.is_some());
    }

    #[tokio::test]
    async fn test_create_keeps_explicit_id() {
        let repos = setup_test_db().await;
        let mut item = action_item("seeded", "Client", ActionStatus::Pending, Priority::Low);
        item.id = 42;

        let created = repos.action_items.create(&item).await.unwrap();
        assert_eq!(created.id, 42);
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let repos = setup_test_db().await;
        let items = [
            action_item("a", "Client", ActionStatus::Pending, Priority::High),
            action_item("b", "Partner", ActionStatus::Pending, Priority::High),
            action_item("c", "Client", ActionStatus::Completed, Priority::High),
        ];
        for item in &items {
            repos.action_items.create(item).await.unwrap();
        }

        let pending = repos
            .action_items
            .list_filtered(&ActionItemFilter { status: Some(ActionStatus::Pending), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);

        let both = repos
            .action_items
            .list_filtered(&ActionItemFilter {
                status: Some(ActionStatus::Pending),
                responsible_party: Some("Client".to_string()),
                meeting_id: None,
            })
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "a");
    }

    #[tokio::test]
    async fn test_update_and_delete_action_item() {
        let repos = setup_test_db().await;
        let mut created = repos.action_items.create(&action_item("a", "Client", ActionStatus::Pending, Priority::Low)).await.unwrap();

        created.status = ActionStatus::Blocked;
        let updated = repos.action_items.update(&created).await.unwrap();
        assert_eq!(updated.status, ActionStatus::Blocked);

        repos.action_items.delete(created.id).await.unwrap();
        assert!(repos.action_items.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(repos.action_items.delete(created.id).await, Err(DomainError::NotFound(_))));
    }

    // ========================
    // Meetings
    // ========================

    #[tokio::test]
    async fn test_meetings_newest_first_with_lists() {
        let repos = setup_test_db().await;
        for (title, date) in [("Kickoff", "2025-11-03"), ("Review", "2026-01-12"), ("Planning", "2025-12-01")] {
            repos
                .meetings
                .create(&Meeting {
                    id: 0,
                    title: title.to_string(),
                    meeting_date: date.to_string(),
                    attendees: vec!["Alex".to_string(), "Sam".to_string()],
                    summary: String::new(),
                    topics: vec!["scope".to_string()],
                    action_item_ids: vec![1, 2],
                    notes: None,
                    created_at: None,
                    updated_at: None,
                })
                .await
                .unwrap();
        }

        let meetings = repos.meetings.list().await.unwrap();
        let titles: Vec<_> = meetings.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Review", "Planning", "Kickoff"]);
        assert_eq!(meetings[0].action_item_ids, vec![1, 2]);
        assert_eq!(meetings[0].attendees.len(), 2);

        let on_date = repos.meetings.list_by_date("2025-12-01").await.unwrap();
        assert_eq!(on_date.len(), 1);
    }

    // ========================
    // Deliverables
    // ========================

    #[tokio::test]
    async fn test_list_by_phase() {
        let repos = setup_test_db().await;
        repos.deliverables.create(&deliverable("Discovery", 1)).await.unwrap();
        repos.deliverables.create(&deliverable("Pilot", 3)).await.unwrap();
        repos.deliverables.create(&deliverable("Rollout", 3)).await.unwrap();

        let phase3 = repos.deliverables.list_by_phase(3).await.unwrap();
        assert_eq!(phase3.len(), 2);
        assert_eq!(phase3[0].evidence, vec!["report.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_update_progress_with_version_check() {
        let repos = setup_test_db().await;
        let created = repos.deliverables.create(&deliverable("Pilot", 3)).await.unwrap();
        let seen = created.updated_at.clone();

        let progress = DeliverableProgress {
            status: DeliverableStatus::Review,
            completion_percentage: 90.0,
            blockers: vec![],
            comments: "Ready for **review**".to_string(),
            expected_updated_at: seen.clone(),
        };
        let updated = repos.deliverables.update_progress(created.id, &progress).await.unwrap();
        assert_eq!(updated.status, DeliverableStatus::Review);
        assert_eq!(updated.completion_percentage, 90.0);
        assert_eq!(updated.comments.as_deref(), Some("Ready for **review**"));

        // Same stale version again, after a write that changed updated_at
        let stale = DeliverableProgress { expected_updated_at: Some("2000-01-01T00:00:00.000Z".to_string()), ..progress };
        let result = repos.deliverables.update_progress(created.id, &stale).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_progress_missing() {
        let repos = setup_test_db().await;
        let progress = DeliverableProgress {
            status: DeliverableStatus::Completed,
            completion_percentage: 100.0,
            blockers: vec![],
            comments: String::new(),
            expected_updated_at: None,
        };
        let result = repos.deliverables.update_progress(99, &progress).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    // ========================
    // Updates
    // ========================

    #[tokio::test]
    async fn test_updates_newest_first_and_filtered() {
        let repos = setup_test_db().await;
        repos.updates.create(&post("old", UpdateType::General, "2026-01-01T00:00:00.000Z")).await.unwrap();
        repos.updates.create(&post("new", UpdateType::Milestone, "2026-01-05T00:00:00.000Z")).await.unwrap();

        let all = repos.updates.list().await.unwrap();
        assert_eq!(all[0].title, "new");

        let milestones = repos.updates.list_by_type(Some(UpdateType::Milestone)).await.unwrap();
        assert_eq!(milestones.len(), 1);
    }

    #[tokio::test]
    async fn test_acknowledge_twice_does_not_duplicate() {
        let repos = setup_test_db().await;
        let created = repos.updates.create(&post("p", UpdateType::General, "")).await.unwrap();

        let (_, first) = repos.updates.acknowledge(created.id, "sam@example.com").await.unwrap();
        let (stored, second) = repos.updates.acknowledge(created.id, "sam@example.com").await.unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(stored.acknowledgements, vec!["sam".to_string()]);

        let reloaded = repos.updates.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.acknowledgements, vec!["sam".to_string()]);
    }

    // ========================
    // Metrics
    // ========================

    #[tokio::test]
    async fn test_record_metric() {
        let repos = setup_test_db().await;
        let created = repos.metrics.create(&metric("Projects Processed", 3.0, 10.0)).await.unwrap();

        let record = MetricRecord { metric_id: Some(created.id), value: 7.0, notes: "week 6".to_string(), expected_updated_at: None };
        let updated = repos.metrics.record(created.id, &record).await.unwrap();
        assert_eq!(updated.current, 7.0);
        assert_eq!(updated.notes, "week 6");

        let missing = repos.metrics.record(404, &record).await;
        assert!(matches!(missing, Err(DomainError::NotFound(msg)) if msg == "Metric ID 404 not found"));
    }

    // ========================
    // Sample projects
    // ========================

    fn sample_project(name: &str, method: DeliveryMethod, size_mb: f64, docs: u32) -> SampleProject {
        SampleProject {
            id: 0,
            name: name.to_string(),
            delivery_method: method,
            project_type: "Commercial".to_string(),
            location: Some("Boise, ID".to_string()),
            size_mb,
            size_sf: Some(42_000),
            description: String::new(),
            ai_value: String::new(),
            document_counts: DocumentCounts { pdfs: Some(docs), total: docs, ..Default::default() },
            key_features: vec!["Lighting control".to_string()],
            highlights: vec![],
            key_files: Some(vec![KeyFile { name: "bid.xlsx".to_string(), size_mb: None, description: "Final bid".to_string() }]),
            metrics: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_sample_projects_filter_by_method() {
        let repos = setup_test_db().await;
        repos.sample_projects.create(&sample_project("Ambrose", DeliveryMethod::PlanSpecBid, 300.0, 40)).await.unwrap();
        repos.sample_projects.create(&sample_project("Clinic", DeliveryMethod::Data, 100.0, 10)).await.unwrap();
        repos.sample_projects.create(&sample_project("Garage", DeliveryMethod::PlanSpecBid, 50.0, 5)).await.unwrap();

        let all = repos.sample_projects.list_by_method(None).await.unwrap();
        let ids: Vec<u32> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(all[0].key_files.as_ref().map(Vec::len), Some(1));
        assert_eq!(all[0].size_sf, Some(42_000));

        let bids = repos.sample_projects.list_by_method(Some(DeliveryMethod::PlanSpecBid)).await.unwrap();
        let names: Vec<&str> = bids.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ambrose", "Garage"]);

        let none = repos.sample_projects.list_by_method(Some(DeliveryMethod::DesignBuild)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_sample_project_stats() {
        let repos = setup_test_db().await;
        repos.sample_projects.create(&sample_project("Ambrose", DeliveryMethod::PlanSpecBid, 1024.0, 40)).await.unwrap();
        repos.sample_projects.create(&sample_project("Clinic", DeliveryMethod::Data, 512.0, 10)).await.unwrap();

        let stats = repos.sample_projects.stats().await.unwrap();
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.total_documents, 50);
        assert_eq!(stats.total_size_gb, 1.5);
        assert_eq!(stats.delivery_methods.get(&DeliveryMethod::Data), Some(&1));
    }

    #[tokio::test]
    async fn test_missing_sample_project() {
        let repos = setup_test_db().await;
        assert!(repos.sample_projects.find_by_id(42).await.unwrap().is_none());

        let missing = repos.sample_projects.delete(42).await;
        assert!(matches!(missing, Err(DomainError::NotFound(msg)) if msg == "Project ID 42 not found"));
    }
}
