//! Instance text reader.
//!
//! The format is a stream of whitespace-separated tokens:
//!
//! ```text
//! n
//! kind id x y        (n times; kind 0 = depot, 1 = linehaul, 2 = backhaul)
//! vehicles capacity
//! id demand          (n times)
//! ```
//!
//! Line breaks carry no meaning. Demands and capacity are numbers that must
//! be integral, so `10` and `10.0` are both accepted. Tokens after the last
//! demand are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use tracing::debug;

use super::ParseError;
use crate::models::{Fleet, Instance, InstanceError, Node, NodeKind};

/// Parses an instance from its text form.
///
/// # Examples
///
/// ```
/// use u_backhaul::io::parse_instance;
///
/// let text = "3
/// 0 1 0 0
/// 1 2 3 4
/// 2 3 0 8
/// 2 50
/// 1 0
/// 2 10
/// 3 5.0";
///
/// let instance = parse_instance(text).unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.num_vehicles(), 2);
/// assert_eq!(instance.capacity(), 50);
/// assert_eq!(instance.node(2).demand(), 5);
/// ```
pub fn parse_instance(text: &str) -> Result<Instance, ParseError> {
    InstanceReader::new(text).read()
}

/// Reads and parses an instance file.
pub fn read_instance_file(path: impl AsRef<Path>) -> Result<Instance, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let instance = parse_instance(&text)?;
    debug!(
        path = %path.display(),
        nodes = instance.nodes().len(),
        vehicles = instance.num_vehicles(),
        capacity = instance.capacity(),
        "instance loaded"
    );
    Ok(instance)
}

/// Shortest possible node record: four one-character tokens and separators.
const MIN_NODE_BYTES: usize = 8;

struct InstanceReader<'a> {
    tokens: SplitWhitespace<'a>,
    position: usize,
    /// Upper bound on how many node records the text can hold.
    max_nodes: usize,
}

impl<'a> InstanceReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace(),
            position: 0,
            max_nodes: text.len() / MIN_NODE_BYTES + 1,
        }
    }

    fn read(mut self) -> Result<Instance, ParseError> {
        let count = self.read_usize("node count")?;
        let (nodes, ids) = self.read_nodes(count)?;
        let fleet = self.read_fleet()?;
        let demands = self.read_demands(nodes.len(), &ids)?;

        let nodes = nodes
            .into_iter()
            .zip(demands)
            .map(|((id, kind, x, y), demand)| Node::new(id, kind, x, y, demand))
            .collect();

        Ok(Instance::new(nodes, fleet)?)
    }

    fn read_nodes(
        &mut self,
        count: usize,
    ) -> Result<(Vec<(i64, NodeKind, f64, f64)>, HashMap<i64, usize>), ParseError> {
        // The declared count is untrusted until the records are read.
        let reserve = count.min(self.max_nodes);
        let mut nodes = Vec::with_capacity(reserve);
        let mut ids = HashMap::with_capacity(reserve);

        for i in 0..count {
            let code = self.read_i64("node kind")?;
            let kind = NodeKind::from_code(code).ok_or(ParseError::UnknownKind {
                code,
                position: self.position,
            })?;
            let id = self.read_i64("node id")?;
            let x = self.read_f64("x coordinate")?;
            let y = self.read_f64("y coordinate")?;

            if ids.insert(id, i).is_some() {
                return Err(InstanceError::DuplicateId(id).into());
            }
            nodes.push((id, kind, x, y));
        }

        Ok((nodes, ids))
    }

    fn read_fleet(&mut self) -> Result<Fleet, ParseError> {
        let vehicles = self.read_usize("vehicle count")?;
        let capacity = self.read_integral("capacity")?;
        Ok(Fleet::new(vehicles, capacity))
    }

    fn read_demands(
        &mut self,
        count: usize,
        ids: &HashMap<i64, usize>,
    ) -> Result<Vec<i32>, ParseError> {
        let mut demands = vec![0; count];
        let mut seen = vec![false; count];

        for _ in 0..count {
            let id = self.read_i64("demand id")?;
            let demand = self.read_integral("demand")?;
            let &idx = ids.get(&id).ok_or(ParseError::UnknownDemandId(id))?;
            if std::mem::replace(&mut seen[idx], true) {
                return Err(ParseError::DuplicateDemand(id));
            }
            demands[idx] = demand;
        }

        Ok(demands)
    }

    fn next_token(&mut self, expected: &'static str) -> Result<&'a str, ParseError> {
        let token = self
            .tokens
            .next()
            .ok_or(ParseError::UnexpectedEof { expected })?;
        self.position += 1;
        Ok(token)
    }

    fn parse<T: std::str::FromStr>(&mut self, expected: &'static str) -> Result<T, ParseError> {
        let token = self.next_token(expected)?;
        token.parse().map_err(|_| ParseError::InvalidToken {
            expected,
            token: token.to_string(),
            position: self.position,
        })
    }

    fn read_usize(&mut self, expected: &'static str) -> Result<usize, ParseError> {
        self.parse(expected)
    }

    fn read_i64(&mut self, expected: &'static str) -> Result<i64, ParseError> {
        self.parse(expected)
    }

    fn read_f64(&mut self, expected: &'static str) -> Result<f64, ParseError> {
        let value: f64 = self.parse(expected)?;
        if !value.is_finite() {
            return Err(ParseError::InvalidToken {
                expected,
                token: value.to_string(),
                position: self.position,
            });
        }
        Ok(value)
    }

    /// A number with no fractional part that fits in `i32`.
    fn read_integral(&mut self, expected: &'static str) -> Result<i32, ParseError> {
        let value = self.read_f64(expected)?;
        if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
            return Err(ParseError::NonIntegral {
                what: expected,
                value,
            });
        }
        Ok(value as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "5
        0 0 50 50
        1 1 60 50
        1 2 40 50
        2 3 50 60
        2 4 50 40
        2 100
        0 0
        1 10
        2 20.0
        3 15
        4 5";

    #[test]
    fn test_parse_sample() {
        let inst = parse_instance(SAMPLE).expect("valid");
        assert_eq!(inst.nodes().len(), 5);
        assert_eq!(inst.depot(), 0);
        assert_eq!(inst.num_vehicles(), 2);
        assert_eq!(inst.capacity(), 100);
        assert_eq!(inst.indices_of_kind(NodeKind::Linehaul), vec![1, 2]);
        assert_eq!(inst.indices_of_kind(NodeKind::Backhaul), vec![3, 4]);
        assert_eq!(inst.node(2).demand(), 20);
        assert!((inst.distance(0, 1) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_demands_in_any_order() {
        let text = "3  1 7 0 0  0 3 1 1  2 9 2 2  1 10  9 4  3 0  7 6";
        let inst = parse_instance(text).expect("valid");
        assert_eq!(inst.depot(), 1);
        assert_eq!(inst.node(inst.index_of(7).expect("id")).demand(), 6);
        assert_eq!(inst.node(inst.index_of(9).expect("id")).demand(), 4);
    }

    #[test]
    fn test_depot_demand_ignored() {
        let text = "2  0 1 0 0  1 2 1 0  1 10  1 99  2 3";
        let inst = parse_instance(text).expect("valid");
        assert_eq!(inst.node(0).demand(), 0);
    }

    #[test]
    fn test_unexpected_eof() {
        let err = parse_instance("3 0 1 0 0 1 2 3").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { expected: "y coordinate" }));

        assert!(matches!(
            parse_instance("").unwrap_err(),
            ParseError::UnexpectedEof { expected: "node count" }
        ));
    }

    #[test]
    fn test_huge_node_count() {
        assert!(matches!(
            parse_instance("999999999999999999 0 0 0 0").unwrap_err(),
            ParseError::UnexpectedEof { expected: "node kind" }
        ));
    }

    #[test]
    fn test_invalid_token() {
        let err = parse_instance("2 0 1 0 0 1 two 1 1").unwrap_err();
        match err {
            ParseError::InvalidToken {
                expected,
                token,
                position,
            } => {
                assert_eq!(expected, "node id");
                assert_eq!(token, "two");
                assert_eq!(position, 7);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = parse_instance("1 3 1 0 0").unwrap_err();
        assert!(matches!(err, ParseError::UnknownKind { code: 3, .. }));
    }

    #[test]
    fn test_duplicate_id() {
        let err = parse_instance("2 0 1 0 0 1 1 5 5 1 10 1 0 1 0").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Instance(InstanceError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_demand_errors() {
        let unknown = parse_instance("2 0 1 0 0 1 2 5 5 1 10 1 0 8 3").unwrap_err();
        assert!(matches!(unknown, ParseError::UnknownDemandId(8)));

        let repeated = parse_instance("2 0 1 0 0 1 2 5 5 1 10 2 3 2 3").unwrap_err();
        assert!(matches!(repeated, ParseError::DuplicateDemand(2)));

        let fractional = parse_instance("2 0 1 0 0 1 2 5 5 1 10 1 0 2 2.5").unwrap_err();
        assert!(matches!(
            fractional,
            ParseError::NonIntegral { what: "demand", .. }
        ));

        let negative = parse_instance("2 0 1 0 0 1 2 5 5 1 10 1 0 2 -4").unwrap_err();
        assert!(matches!(
            negative,
            ParseError::Instance(InstanceError::NegativeDemand { id: 2, demand: -4 })
        ));
    }

    #[test]
    fn test_depot_count() {
        let none = parse_instance("1 1 1 0 0 1 10 1 3").unwrap_err();
        assert!(matches!(none, ParseError::Instance(InstanceError::MissingDepot)));

        let two = parse_instance("2 0 1 0 0 0 2 1 1 1 10 1 0 2 0").unwrap_err();
        assert!(matches!(
            two,
            ParseError::Instance(InstanceError::MultipleDepots { first: 1, second: 2 })
        ));
    }

    #[test]
    fn test_capacity_checks() {
        let fractional = parse_instance("1 0 1 0 0 1 10.5 1 0").unwrap_err();
        assert!(matches!(
            fractional,
            ParseError::NonIntegral { what: "capacity", .. }
        ));
        let negative = parse_instance("1 0 1 0 0 1 -10 1 0").unwrap_err();
        assert!(matches!(
            negative,
            ParseError::Instance(InstanceError::NegativeCapacity(-10))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_instance_file("/nonexistent/instance.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/instance.txt"));
    }
}
