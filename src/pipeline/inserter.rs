//! Stage that turns a request's YQL string into its query tree.

use log::debug;

use crate::error::Result;
use crate::pipeline::request::SearchRequest;
use crate::pipeline::stage::Stage;
use crate::query::parser::QueryParser;

/// Parses the YQL string carried by a request and installs the tree.
///
/// Requests without a YQL string pass through untouched.
#[derive(Debug, Default, Clone)]
pub struct QueryInserter {
    parser: QueryParser,
}

impl QueryInserter {
    /// Create an inserter with a default parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inserter with a configured parser.
    pub fn with_parser(parser: QueryParser) -> Self {
        QueryInserter { parser }
    }
}

impl Stage for QueryInserter {
    fn name(&self) -> &str {
        "query-inserter"
    }

    fn process(&self, request: &mut SearchRequest) -> Result<()> {
        let tree = match request.yql() {
            Some(yql) => self.parser.parse_yql(yql)?,
            None => return Ok(()),
        };

        debug!("parsed query: {tree}");
        let message = format!("query tree: {tree}");
        request.set_tree(tree);
        request.trace_mut().trace(2, self.name(), message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RewriteError;

    #[test]
    fn test_inserts_tree() {
        let mut request =
            SearchRequest::from_yql("select * from sources * where title contains \"drum\";")
                .with_trace_level(2);

        QueryInserter::new().process(&mut request).unwrap();

        assert_eq!(request.tree().to_string(), "title:drum");
        assert_eq!(
            request.trace().messages().collect::<Vec<_>>(),
            vec!["query tree: title:drum"]
        );
    }

    #[test]
    fn test_passes_through_without_yql() {
        let mut request = SearchRequest::new();
        QueryInserter::new().process(&mut request).unwrap();
        assert!(request.tree().is_empty());
    }

    #[test]
    fn test_parse_error_propagates() {
        let mut request = SearchRequest::from_yql("select * from sources * where title");
        let result = QueryInserter::new().process(&mut request);
        assert!(matches!(result, Err(RewriteError::Query(_))));
    }
}
