//! Shared documents and attribute types for integration tests.

#![allow(dead_code)]

use serde::Deserialize;

// =============================================================================
// ATTRIBUTE TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Article {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct People {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub body: String,
}

// =============================================================================
// DOCUMENTS
// =============================================================================

pub const SIMPLE_SINGLE_RESOURCE: &str = r#"{
  "data": {
    "type": "articles",
    "id": "1",
    "attributes": {
      "title": "JSON:API paints my bikeshed!"
    }
  }
}"#;

pub const SIMPLE_ARRAY_RESOURCE: &str = r#"{
  "data": [{
    "type": "articles",
    "id": "1",
    "attributes": {
      "title": "JSON:API paints my bikeshed!"
    }
  }]
}"#;

pub const RELATIONSHIPS_RESOURCE: &str = r#"{
  "data": {
    "type": "articles",
    "id": "1",
    "attributes": {
      "title": "JSON:API paints my bikeshed!"
    },
    "relationships": {
      "author": {
        "data": {"type": "people", "id": "9"}
      },
      "comments": {
        "data": [
          {"type": "comments", "id": "5"},
          {"type": "comments", "id": "12"}
        ]
      },
      "tags": {
        "data": []
      }
    }
  }
}"#;

pub const INCLUDED: &str = r#"{
  "links": {
    "self": "http://example.com/articles/1"
  },
  "data": {
    "type": "articles",
    "id": "1",
    "attributes": {
      "title": "JSON:API paints my bikeshed!"
    },
    "relationships": {
      "author": {
        "links": {
          "self": "http://example.com/articles/1/relationships/author",
          "related": "http://example.com/articles/1/author"
        },
        "data": {"type": "people", "id": "9"}
      },
      "comments": {
        "links": {
          "self": "http://example.com/articles/1/relationships/comments",
          "related": "http://example.com/articles/1/comments"
        },
        "data": [
          {"type": "comments", "id": "5"},
          {"type": "comments", "id": "12"}
        ]
      }
    },
    "links": {
      "self": "http://example.com/articles/1"
    }
  },
  "included": [{
    "type": "people",
    "id": "9",
    "attributes": {
      "firstName": "Dan",
      "lastName": "Gebhardt",
      "twitter": "dgeb"
    },
    "links": {
      "self": "http://example.com/people/9"
    }
  }, {
    "type": "comments",
    "id": "5",
    "attributes": {
      "body": "First!"
    },
    "relationships": {
      "author": {
        "data": {"type": "people", "id": "2"}
      }
    },
    "links": {
      "self": "http://example.com/comments/5"
    }
  }, {
    "type": "comments",
    "id": "12",
    "attributes": {
      "body": "I like XML better"
    },
    "relationships": {
      "author": {
        "data": {"type": "people", "id": "9"}
      }
    },
    "links": {
      "self": "http://example.com/comments/12"
    }
  }]
}"#;

pub const RELATIONSHIP_LINKS_ONLY: &str = r#"{
  "data": {
    "type": "articles",
    "id": "1",
    "relationships": {
      "author": {
        "links": {"related": "http://example.com/articles/1/author"},
        "data": {"type": "people", "id": "9"}
      }
    }
  }
}"#;

pub const ERROR: &str = r#"{
  "errors": [{
    "status": "422",
    "source": {"pointer": "/data/attributes/firstName"},
    "title": "Invalid Attribute",
    "detail": "First name must contain at least three characters."
  }]
}"#;
