use serde_json::json;
use vigie::{
    network::{Direction, Station},
    reports::{Category, NewReport, Report},
    workflow::{Chooser, ReportApi},
};

/// Talks to the `markers` resource of a running server.
pub struct HttpReportApi {
    client: reqwest::Client,
    markers_url: String,
}

impl HttpReportApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            markers_url: format!("{}/api/markers", base_url.trim_end_matches('/')),
        }
    }
}

impl ReportApi for HttpReportApi {
    type Error = reqwest::Error;

    async fn list_reports(&self) -> Result<Vec<Report>, Self::Error> {
        self.client
            .get(&self.markers_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn create_report(&self, report: NewReport) -> Result<Report, Self::Error> {
        let body = json!({
            "lat": report.lat,
            "lng": report.lng,
            "type": report.category,
        });
        self.client
            .post(&self.markers_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// Answers the workflow with the choices given on the command line.
pub struct ArgsChooser {
    pub category: Option<String>,
    pub direction: usize,
}

impl Chooser for ArgsChooser {
    fn choose_direction(&mut self, station: &Station, directions: &[Direction]) -> Option<usize> {
        println!("Directions from {}:", station.name);
        for (i, direction) in directions.iter().enumerate() {
            println!(
                "  [{i}] line {} toward {} ({} stops)",
                direction.line,
                direction.terminus,
                direction.stations.len()
            );
        }
        Some(self.direction)
    }

    fn choose_category(&mut self, _: &[Category]) -> Option<Category> {
        Some(match &self.category {
            Some(key) => Category::from_key(key),
            None => Category::from_key(Category::DEFAULT_KEY),
        })
    }
}
