//! OpenAPI document for the REST API, served at `/api/v1/openapi.json`.

use utoipa::OpenApi;

use super::error::ErrorBody;
use super::schemas::{OrderIn, OrderOut, UserIn, UserOut};

#[derive(OpenApi)]
#[openapi(
    info(title = "Users App", description = "Handling Our User", version = "1"),
    paths(
        super::users::create_user,
        super::users::list_users,
        super::users::get_user,
        super::users::update_user,
        super::users::delete_user,
        super::users::list_user_orders,
        super::users::get_user_order,
        super::orders::create_order,
        super::orders::list_orders,
        super::orders::get_order,
    ),
    components(schemas(UserIn, UserOut, OrderIn, OrderOut, ErrorBody)),
    tags(
        (name = "users", description = "Users and the orders they placed"),
        (name = "orders", description = "Orders across every customer")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn info_names_the_service() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Users App");
        assert_eq!(doc.info.description.as_deref(), Some("Handling Our User"));
        assert_eq!(doc.info.version, "1");
    }

    #[test]
    fn user_out_schema_has_every_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_out = schemas.get("UserOut").expect("UserOut schema");

        for field in ["id", "name", "surname", "created_at"] {
            assert_object_schema_has_field(user_out, field);
        }
    }

    #[test]
    fn error_body_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_body = schemas.get("ErrorBody").expect("ErrorBody schema");

        assert_object_schema_has_field(error_body, "error");
        assert_object_schema_has_field(error_body, "message");
    }
}
