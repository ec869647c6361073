use serde_json::{json, Value};

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn book_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn id_parameter(description: &str) -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": description,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn request_body() -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookRequest" }
            }
        }
    })
}

/// OpenAPI fragment for the books routes, relative to the module mount point
pub fn document() -> Value {
    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "description": "Retrieve every book, optionally filtered by category (case-insensitive)",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "category",
                        "in": "query",
                        "required": false,
                        "description": "Optional category filter",
                        "schema": { "type": "string" }
                    }],
                    "responses": {
                        "200": {
                            "description": "List of books",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "summary": "Create a new book",
                    "description": "Add a new book to the end of the list",
                    "tags": ["Books"],
                    "requestBody": request_body(),
                    "responses": {
                        "201": { "description": "Book created" },
                        "400": error_response("Invalid book request")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "text/plain": { "schema": { "type": "string" } }
                            }
                        }
                    }
                }
            },
            "/title/{title}": {
                "get": {
                    "summary": "Get a book by title",
                    "description": "Case-insensitive title match; the body is null when no book matches",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "title",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string" }
                    }],
                    "responses": {
                        "200": {
                            "description": "The matching book, or null",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "oneOf": [
                                            { "$ref": "#/components/schemas/Book" },
                                            { "type": "null" }
                                        ]
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/id/{id}": {
                "get": {
                    "summary": "Get a book by ID",
                    "description": "Retrieve a specific book by ID",
                    "tags": ["Books"],
                    "parameters": [id_parameter("ID of the book to be retrieved, at least 1")],
                    "responses": {
                        "200": book_response("The requested book"),
                        "400": error_response("ID below 1"),
                        "404": error_response("Book not found")
                    }
                }
            },
            "/{id}": {
                "put": {
                    "summary": "Update a book",
                    "description": "Replace the details of an existing book",
                    "tags": ["Books"],
                    "parameters": [id_parameter("ID of the book to be updated")],
                    "requestBody": request_body(),
                    "responses": {
                        "200": book_response("The updated book"),
                        "400": error_response("Invalid book request"),
                        "404": error_response("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "description": "Remove a book from the list",
                    "tags": ["Books"],
                    "parameters": [id_parameter("ID of the book to be deleted")],
                    "responses": {
                        "204": { "description": "Book deleted" },
                        "404": error_response("Book not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64", "description": "Unique identifier for the book" },
                        "title": { "type": "string", "description": "Title of the book" },
                        "author": { "type": "string", "description": "Author of the book" },
                        "category": { "type": "string", "description": "Category of the book" },
                        "rating": { "type": "integer", "format": "int32", "description": "Reader rating" }
                    },
                    "required": ["id", "title", "author", "category", "rating"]
                },
                "BookRequest": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "category": { "type": "string" },
                        "rating": { "type": "integer", "format": "int32" }
                    },
                    "required": ["title", "author", "category", "rating"]
                }
            }
        }
    })
}
