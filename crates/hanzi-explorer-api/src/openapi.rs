// SPDX-License-Identifier: Apache-2.0

use crate::error_codes::API_ERROR_CODES;
use serde_json::{json, Value};

pub const API_VERSION: &str = "v1";

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}
    })
}

fn json_response(description: &str, schema: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/{schema}")}}}
    })
}

fn filter_params() -> Value {
    json!([
        {"name": "volume", "in": "query", "schema": {"type": "integer"}},
        {"name": "chapter", "in": "query", "schema": {"type": "integer"}}
    ])
}

fn id_param() -> Value {
    json!([{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}])
}

fn admin_crud(list_schema: &str) -> Value {
    json!({
        "get": {
            "security": [{"session": []}],
            "responses": {
                "200": json_response("list", list_schema),
                "401": error_response("missing or invalid session"),
                "403": error_response("not an admin")
            }
        },
        "post": {
            "security": [{"session": []}],
            "responses": {
                "201": {"description": "created"},
                "400": error_response("validation failed"),
                "409": error_response("duplicate key")
            }
        }
    })
}

fn admin_item(with_put: bool) -> Value {
    let mut item = json!({
        "parameters": id_param(),
        "delete": {
            "security": [{"session": []}],
            "responses": {"200": {"description": "deleted"}, "404": error_response("not found")}
        }
    });
    if with_put {
        item["get"] = json!({
            "security": [{"session": []}],
            "responses": {"200": {"description": "entity"}, "404": error_response("not found")}
        });
        item["put"] = json!({
            "security": [{"session": []}],
            "responses": {
                "200": {"description": "updated"},
                "400": error_response("validation failed"),
                "404": error_response("not found"),
                "409": error_response("duplicate key")
            }
        });
    }
    item
}

/// OpenAPI 3 description of every route the server mounts.
#[must_use]
pub fn openapi_spec() -> Value {
    json!({
      "openapi": "3.0.3",
      "info": {"title": "hanzi-explorer API", "version": API_VERSION},
      "paths": {
        "/admin/characters": admin_crud("CharacterList"),
        "/admin/characters/{id}": admin_item(true),
        "/admin/dashboard": {
          "get": {"security": [{"session": []}], "responses": {"200": json_response("counts", "Stats")}}
        },
        "/admin/export": {
          "get": {"security": [{"session": []}], "responses": {"200": json_response("catalog document", "ImportDocument")}}
        },
        "/admin/import": {
          "post": {
            "security": [{"session": []}],
            "parameters": [{"name": "mode", "in": "query", "schema": {"type": "string", "enum": ["append", "replace"]}}],
            "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/ImportDocument"}}}},
            "responses": {
              "200": json_response("import report", "ImportReport"),
              "400": error_response("malformed document"),
              "409": error_response("characters already exist"),
              "413": error_response("document too large")
            }
          }
        },
        "/admin/keywords": admin_crud("KeywordList"),
        "/admin/keywords/{id}": admin_item(false),
        "/admin/primitives": admin_crud("PrimitiveList"),
        "/admin/primitives/{id}": admin_item(true),
        "/api/character/{glyph}": {
          "get": {
            "parameters": [{"name": "glyph", "in": "path", "required": true, "schema": {"type": "string"}}],
            "responses": {"200": json_response("character", "CharacterView"), "404": error_response("Character not found")}
          }
        },
        "/api/characters": {
          "get": {
            "parameters": filter_params(),
            "responses": {
              "200": json_response("characters", "CharacterList"),
              "304": {"description": "not modified"}
            }
          }
        },
        "/api/graph-data": {"get": {"responses": {"200": json_response("graph", "GraphData")}}},
        "/api/metadata": {"get": {"responses": {"200": json_response("navigation metadata", "Metadata")}}},
        "/api/openapi.json": {"get": {"responses": {"200": {"description": "this document"}}}},
        "/api/primitives": {"get": {"responses": {"200": json_response("primitives", "PrimitiveList")}}},
        "/api/primitives/{id}": {
          "get": {
            "parameters": id_param(),
            "responses": {"200": json_response("primitive", "PrimitiveDetail"), "404": error_response("not found")}
          }
        },
        "/api/search": {
          "get": {
            "parameters": [
              {"name": "q", "in": "query", "schema": {"type": "string"}},
              {"name": "volume", "in": "query", "schema": {"type": "integer"}},
              {"name": "chapter", "in": "query", "schema": {"type": "integer"}}
            ],
            "responses": {"200": json_response("matches", "CharacterList"), "400": error_response("invalid query parameter")}
          }
        },
        "/api/stats": {"get": {"responses": {"200": json_response("counts and recent", "Stats")}}},
        "/api/version": {"get": {"responses": {"200": {"description": "service version"}}}},
        "/auth/login": {
          "post": {"responses": {"200": {"description": "session issued"}, "401": error_response("invalid credentials")}}
        },
        "/auth/logout": {"post": {"responses": {"200": {"description": "session cookie cleared"}}}},
        "/auth/register": {
          "post": {
            "responses": {
              "201": {"description": "account created"},
              "400": error_response("validation failed"),
              "409": error_response("duplicate key")
            }
          }
        },
        "/healthz": {
          "get": {"responses": {"200": {"description": "ok"}, "503": error_response("store unavailable")}}
        }
      },
      "components": {
        "securitySchemes": {
          "session": {"type": "http", "scheme": "bearer"}
        },
        "schemas": {
          "ApiError": {
            "type": "object",
            "additionalProperties": false,
            "required": ["error", "code", "details", "request_id"],
            "properties": {
              "error": {"type": "string"},
              "code": {"type": "string", "enum": API_ERROR_CODES},
              "details": {"type": "object"},
              "request_id": {"type": "string"}
            }
          },
          "CharacterList": {"type": "array", "items": {"$ref": "#/components/schemas/CharacterView"}},
          "CharacterView": {
            "type": "object",
            "required": ["id", "hanzi", "heisig_index", "keywords", "primitives"],
            "properties": {
              "id": {"type": "integer"},
              "hanzi": {"type": "string"},
              "heisig_index": {"type": "integer"},
              "keyword": {"type": "string", "nullable": true},
              "keywords": {"type": "array", "items": {"type": "string"}},
              "story": {"type": "string", "nullable": true},
              "strokes": {"type": "integer", "nullable": true},
              "pinyin": {"type": "string", "nullable": true},
              "traditional": {"type": "string", "nullable": true},
              "volume": {"type": "integer", "nullable": true},
              "chapter": {"type": "integer", "nullable": true},
              "primitives": {"type": "array", "items": {"type": "object"}}
            }
          },
          "GraphData": {
            "type": "object",
            "required": ["nodes", "edges"],
            "properties": {
              "nodes": {"type": "array", "items": {"type": "object", "properties": {
                "id": {"type": "string"},
                "type": {"type": "string", "enum": ["character", "primitive"]},
                "label": {"type": "string"},
                "title": {"type": "string"}
              }}},
              "edges": {"type": "array", "items": {"type": "object", "properties": {
                "id": {"type": "string"}, "from": {"type": "string"}, "to": {"type": "string"}
              }}},
              "skipped_edges": {"type": "integer"}
            }
          },
          "ImportDocument": {
            "type": "object",
            "required": ["characters"],
            "properties": {"characters": {"type": "array", "items": {"type": "object"}}}
          },
          "ImportReport": {"type": "object"},
          "KeywordList": {"type": "array", "items": {"type": "object"}},
          "Metadata": {
            "type": "object",
            "required": ["volumes"],
            "properties": {"volumes": {"type": "array", "items": {"type": "object", "properties": {
              "number": {"type": "integer"},
              "title": {"type": "string"},
              "chapters": {"type": "array", "items": {"type": "object"}}
            }}}}
          },
          "PrimitiveDetail": {"type": "object"},
          "PrimitiveList": {"type": "array", "items": {"type": "object"}},
          "Stats": {"type": "object", "required": ["counts", "recent"]}
        }
      }
    })
}
