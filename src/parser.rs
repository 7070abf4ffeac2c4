use std::io::BufRead;

use crate::error::ImportError;
use crate::graph::Graph;

/// A `.vc` instance as read from disk: first line `n m`, second line the `n`
/// vertex weights, then `m` lines with 1-indexed edge endpoints. Lines
/// starting with `c` are comments.
#[derive(Clone, Debug)]
pub struct ParsedInstance {
    pub n: usize,
    pub m: usize,
    pub weights: Vec<f64>,
    pub edges: Vec<(u32, u32)>,
}

impl ParsedInstance {
    pub fn from_reader<R: BufRead>(input: R) -> Result<Self, ImportError> {
        let mut lines = input.lines().filter(|line| match line {
            Ok(line) => !line.starts_with("c ") && !line.trim().is_empty(),
            Err(_) => true,
        });

        let header = lines
            .next()
            .ok_or_else(|| ImportError::InputMalformed("missing header line".to_owned()))??;
        let mut parts = header.split_whitespace();
        let n: usize = parts
            .next()
            .ok_or_else(|| ImportError::InputMalformed("missing vertex count".to_owned()))?
            .parse()?;
        let m: usize = parts
            .next()
            .ok_or_else(|| ImportError::InputMalformed("missing edge count".to_owned()))?
            .parse()?;

        let weight_line = lines
            .next()
            .ok_or_else(|| ImportError::InputMalformed("missing weight line".to_owned()))??;
        let weights = weight_line
            .split_whitespace()
            .map(|w| w.parse::<f64>().map_err(ImportError::from))
            .collect::<Result<Vec<_>, _>>()?;
        if weights.len() != n {
            return Err(ImportError::InputMalformed(format!(
                "expected {} weights, found {}",
                n,
                weights.len()
            )));
        }
        if let Some(w) = weights.iter().find(|w| **w < 0.0) {
            return Err(ImportError::InputMalformed(format!(
                "negative vertex weight {}",
                w
            )));
        }

        let mut edges = Vec::with_capacity(m);
        for line in lines {
            let line = line?;
            let mut parts = line.split_whitespace();
            let u: u32 = parts
                .next()
                .ok_or_else(|| ImportError::InputMalformed("empty edge line".to_owned()))?
                .parse()?;
            let v: u32 = parts
                .next()
                .ok_or_else(|| ImportError::InputMalformed("edge with one endpoint".to_owned()))?
                .parse()?;
            for endpoint in [u, v] {
                if endpoint == 0 || endpoint as usize > n {
                    return Err(ImportError::InputMalformed(format!(
                        "edge endpoint {} out of range 1..={}",
                        endpoint, n
                    )));
                }
            }
            edges.push((u, v));
        }
        if edges.len() != m {
            return Err(ImportError::InputMalformed(format!(
                "expected {} edges, found {}",
                m,
                edges.len()
            )));
        }

        Ok(ParsedInstance {
            n,
            m,
            weights,
            edges,
        })
    }

    /// Builds the graph, vertex `i + 1` getting the weight at index `i`.
    pub fn into_graph(self) -> Graph {
        let vertices = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (i as u32 + 1, w))
            .collect::<Vec<_>>();
        Graph::new(vertices, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_well_formed_instance() {
        let vc = Cursor::new("3 3\n1.0 2.0 3.0\n1 2\n2 3\n1 3\n");
        let instance = ParsedInstance::from_reader(vc).unwrap();
        assert_eq!(instance.n, 3);
        assert_eq!(instance.m, 3);
        assert_eq!(instance.weights, vec![1.0, 2.0, 3.0]);
        let graph = instance.into_graph();
        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.weight(2), 2.0);
    }

    #[test]
    fn parse_skips_comment_lines() {
        let vc = Cursor::new("c a tiny instance\n2 1\nc weights follow\n5.0 1.0\n1 2\n");
        let instance = ParsedInstance::from_reader(vc).unwrap();
        assert_eq!(instance.n, 2);
        assert_eq!(instance.edges, vec![(1, 2)]);
    }

    #[test]
    fn parse_rejects_negative_weight() {
        let vc = Cursor::new("2 1\n1.0 -2.0\n1 2\n");
        assert!(matches!(
            ParsedInstance::from_reader(vc),
            Err(ImportError::InputMalformed(_))
        ));
    }

    #[test]
    fn parse_rejects_out_of_range_endpoint() {
        let vc = Cursor::new("2 1\n1.0 2.0\n1 3\n");
        assert!(matches!(
            ParsedInstance::from_reader(vc),
            Err(ImportError::InputMalformed(_))
        ));
    }

    #[test]
    fn parse_rejects_truncated_edge_list() {
        let vc = Cursor::new("3 2\n1.0 1.0 1.0\n1 2\n");
        assert!(matches!(
            ParsedInstance::from_reader(vc),
            Err(ImportError::InputMalformed(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_number() {
        let vc = Cursor::new("2 1\n1.0 two\n1 2\n");
        assert!(matches!(
            ParsedInstance::from_reader(vc),
            Err(ImportError::BadFloat(_))
        ));
    }
}
