use chrono::Utc;
use vigie::reports::{Category, Error, FileStore, MemoryStore, NewReport, ReportStore};

fn stores() -> (tempfile::TempDir, Vec<Box<dyn ReportStore>>) {
    let dir = tempfile::tempdir().unwrap();
    let file = FileStore::open(dir.path().join("reports.jsonl")).unwrap();
    (dir, vec![Box::new(MemoryStore::new()), Box::new(file)])
}

#[test]
fn created_report_is_listed() {
    let (_dir, stores) = stores();
    for store in stores {
        let before = Utc::now();
        let report = store
            .create(NewReport::new(48.85, 2.35).with_category("controleur"))
            .unwrap();
        assert_eq!(report.id, 1);
        assert_eq!(report.category, "controleur");
        assert_eq!((report.lat, report.lng), (48.85, 2.35));
        assert!(report.timestamp >= before);

        let reports = store.list().unwrap();
        assert_eq!(reports, vec![report]);
    }
}

#[test]
fn nan_coordinate_is_rejected_without_write() {
    let (_dir, stores) = stores();
    for store in stores {
        let result = store.create(NewReport::new(f64::NAN, 2.35).with_category("controleur"));
        assert!(matches!(result, Err(Error::InvalidCoordinate { .. })));
        assert!(store.list().unwrap().is_empty());
    }
}

#[test]
fn unrecognized_category_is_kept_and_displayed_as_default() {
    let (_dir, stores) = stores();
    for store in stores {
        let report = store
            .create(NewReport::new(45.7578, 4.8320).with_category("pickpocket"))
            .unwrap();
        assert_eq!(report.category, "pickpocket");
        assert_eq!(report.display_category(), Category::Other);
    }
}

#[test]
fn missing_category_uses_default_key() {
    let (_dir, stores) = stores();
    for store in stores {
        let report = store.create(NewReport::new(45.7578, 4.8320)).unwrap();
        assert_eq!(report.category, Category::DEFAULT_KEY);
        assert_eq!(report.display_category(), Category::Inspector);
    }
}

#[test]
fn reports_are_listed_in_creation_order() {
    let (_dir, stores) = stores();
    for store in stores {
        for category in ["controleur", "musicien", "incident"] {
            store
                .create(NewReport::new(45.76, 4.83).with_category(category))
                .unwrap();
        }
        let reports = store.list().unwrap();
        let ids: Vec<_> = reports.iter().map(|report| report.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert!(reports.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }
}

#[test]
fn file_store_keeps_reports_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.jsonl");
    {
        let store = FileStore::open(&path).unwrap();
        store.create(NewReport::new(45.76, 4.83)).unwrap();
        assert!(store.create(NewReport::new(45.76, f64::INFINITY)).is_err());
        store
            .create(NewReport::new(45.75, 4.84).with_category("musicien"))
            .unwrap();
    }
    let store = FileStore::open(&path).unwrap();
    let reports = store.list().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[1].category, "musicien");
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
}
