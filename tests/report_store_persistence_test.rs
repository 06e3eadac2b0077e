// ==========================================
// 报告存储持久化测试
// ==========================================
// 目标:
// - 归档在“重启”（重新打开 AppState）后可恢复
// - 归档损坏时按空归档处理，不报错
// - archive_limit 配置生效
// - 草稿在调用之间保留
// ==========================================


#[cfg(test)]
mod report_store_persistence_test {
    use shift_handover::repository::report_archive_repo::{ARCHIVE_KEY, DRAFT_KEY};
    use shift_handover::{EquipmentStatus, ReportAction, Shift};

    use crate::test_helpers::{create_test_db, open_state, set_config, write_raw_kv};

    #[test]
    fn test_archive_survives_restart() {
        let (_tmp, db_path) = create_test_db().unwrap();

        let saved_id = {
            let mut state = open_state(&db_path);
            let store = &mut state.report_store;
            store
                .dispatch(ReportAction::SetOperator("Jonas".to_string()))
                .unwrap();
            store
                .dispatch(ReportAction::SetEquipmentStatus {
                    group_index: 1,
                    item_id: "p-201".to_string(),
                    status: EquipmentStatus::Standby,
                })
                .unwrap();
            store.save().unwrap().id.clone()
        };

        let state = open_state(&db_path);
        let archive = state.report_store.archive();
        assert_eq!(archive.len(), 1);

        let report = archive.find(&saved_id).unwrap();
        assert_eq!(report.operator, "Jonas");
        assert_eq!(report.groups[1].items[0].status, EquipmentStatus::Standby);
    }

    #[test]
    fn test_archive_limit_across_restarts() {
        let (_tmp, db_path) = create_test_db().unwrap();

        let mut last_id = String::new();
        for i in 0..25 {
            let mut state = open_state(&db_path);
            let store = &mut state.report_store;
            store.new_report();
            store
                .dispatch(ReportAction::SetOperator(format!("op-{}", i)))
                .unwrap();
            last_id = store.save().unwrap().id.clone();
        }

        let state = open_state(&db_path);
        let entries = state.report_store.archive().entries();
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0].id, last_id);
        assert_eq!(entries[0].operator, "op-24");
        assert_eq!(entries[19].operator, "op-5");
    }

    #[test]
    fn test_configured_archive_limit() {
        let (_tmp, db_path) = create_test_db().unwrap();
        set_config(&db_path, "archive_limit", "3");

        let mut state = open_state(&db_path);
        let store = &mut state.report_store;
        for i in 0..5 {
            store.new_report();
            store
                .dispatch(ReportAction::SetOperator(format!("op-{}", i)))
                .unwrap();
            store.save().unwrap();
        }

        let operators: Vec<&str> = store
            .archive()
            .entries()
            .iter()
            .map(|r| r.operator.as_str())
            .collect();
        assert_eq!(operators, vec!["op-4", "op-3", "op-2"]);
    }

    #[test]
    fn test_stored_archive_limit_above_twenty_is_ignored() {
        let (_tmp, db_path) = create_test_db().unwrap();
        set_config(&db_path, "archive_limit", "50");

        {
            let mut state = open_state(&db_path);
            let store = &mut state.report_store;
            assert_eq!(store.archive().limit(), 20);
            for i in 0..30 {
                store.new_report();
                store
                    .dispatch(ReportAction::SetOperator(format!("op-{}", i)))
                    .unwrap();
                store.save().unwrap();
            }
            assert_eq!(store.archive().len(), 20);
        }

        let state = open_state(&db_path);
        let entries = state.report_store.archive().entries();
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0].operator, "op-29");
        assert_eq!(entries[19].operator, "op-10");
    }

    #[test]
    fn test_corrupted_archive_loads_empty() {
        let (_tmp, db_path) = create_test_db().unwrap();

        for blob in ["not json", "{\"a\":1}", "[{\"id\":42}]", "null"] {
            write_raw_kv(&db_path, ARCHIVE_KEY, blob);
            let state = open_state(&db_path);
            assert!(state.report_store.archive().is_empty(), "blob: {}", blob);
        }
    }

    #[test]
    fn test_save_after_corruption_overwrites_blob() {
        let (_tmp, db_path) = create_test_db().unwrap();
        write_raw_kv(&db_path, ARCHIVE_KEY, "garbage");

        let mut state = open_state(&db_path);
        state
            .report_store
            .dispatch(ReportAction::SetOperator("Ines".to_string()))
            .unwrap();
        state.report_store.save().unwrap();

        let reopened = open_state(&db_path);
        assert_eq!(reopened.report_store.archive().len(), 1);
    }

    #[test]
    fn test_draft_persists_and_corrupted_draft_is_ignored() {
        let (_tmp, db_path) = create_test_db().unwrap();

        let draft_id = {
            let mut state = open_state(&db_path);
            state
                .report_store
                .dispatch(ReportAction::SetShift(Shift::Afternoon))
                .unwrap();
            state.report_store.persist_draft().unwrap();
            state.report_store.current().id.clone()
        };

        let state = open_state(&db_path);
        assert_eq!(state.report_store.current().id, draft_id);
        assert_eq!(state.report_store.current().shift, Shift::Afternoon);

        write_raw_kv(&db_path, DRAFT_KEY, "{\"broken\":");
        let state = open_state(&db_path);
        assert_ne!(state.report_store.current().id, draft_id);
        assert!(state.report_store.current().operator.is_empty());
    }

    #[test]
    fn test_configured_template_and_team() {
        let (_tmp, db_path) = create_test_db().unwrap();
        set_config(
            &db_path,
            "equipment_template",
            r#"{"groups":[{"name":"Filters","items":[{"id":"f1","tag":"F-1","status":"RUNNING"},{"id":"f2","tag":"F-2","status":"STANDBY"}]}]}"#,
        );
        set_config(&db_path, "default_team", "D");

        let state = open_state(&db_path);
        let report = state.report_store.current();
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].name, "Filters");
        assert_eq!(report.groups[0].items[1].status, EquipmentStatus::Standby);
        assert_eq!(report.team, shift_handover::Team::D);
    }
}
