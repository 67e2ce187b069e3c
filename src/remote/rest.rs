use super::http_client::decode;
use super::*;
use crate::rows::{Match, Order, Row, RowStore};

fn table_path(table: &str) -> String {
    format!("/rest/v1/{}", table)
}

fn filter_param(m: &Match) -> (String, String) {
    (m.column.clone(), format!("eq.{}", m.value))
}

impl RowStore for RemoteClient {
    fn select(
        &self,
        table: &str,
        filter: Option<&Match>,
        order: Option<&Order>,
    ) -> AdminResult<Vec<Row>> {
        let label = format!("select {}", table);
        let mut query = vec![("select".to_string(), "*".to_string())];
        if let Some(m) = filter {
            query.push(filter_param(m));
        }
        if let Some(o) = order {
            query.push(("order".to_string(), o.to_param()));
        }
        let req = self
            .request(reqwest::Method::GET, &table_path(table), None)
            .query(&query);
        let resp = self.send(req, &label)?;
        decode(resp, &label)
    }

    fn update(&self, table: &str, matching: &Match, fields: &Row) -> AdminResult<Vec<Row>> {
        let label = format!("update {}", table);
        let req = self
            .request(reqwest::Method::PATCH, &table_path(table), None)
            .query(&[filter_param(matching)])
            .header("Prefer", PREFER_REPRESENTATION)
            .json(fields);
        let resp = self.send(req, &label)?;
        decode(resp, &label)
    }

    fn insert(&self, table: &str, fields: &Row) -> AdminResult<Vec<Row>> {
        let label = format!("insert {}", table);
        let req = self
            .request(reqwest::Method::POST, &table_path(table), None)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(fields);
        let resp = self.send(req, &label)?;
        decode(resp, &label)
    }

    fn delete(&self, table: &str, matching: &Match) -> AdminResult<Vec<Row>> {
        let label = format!("delete {}", table);
        let req = self
            .request(reqwest::Method::DELETE, &table_path(table), None)
            .query(&[filter_param(matching)])
            .header("Prefer", PREFER_REPRESENTATION);
        let resp = self.send(req, &label)?;
        decode(resp, &label)
    }
}
