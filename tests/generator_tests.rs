mod common;

use common::fixtures::endpoint;
use enterprise_gen::config::GeneratorConfig;
use enterprise_gen::generator::{
    build_dto, synthesize_dto, synthesize_endpoint, synthesize_rest_config, EndpointContext,
    JavaRenderer,
};

const CREATE_SERVICE: &str = "org.meveo.script.CreateMyProduct";

fn render_endpoint(method: &str, path: &str, payload: Option<&str>) -> String {
    let config = GeneratorConfig::default();
    let ep = endpoint("productEndpoint", method, path, CREATE_SERVICE);
    let ctx = EndpointContext::new(&ep, payload, "mymodule");
    synthesize_endpoint(&ctx, &config, &JavaRenderer).unwrap()
}

fn lines(source: &str) -> Vec<&str> {
    source.lines().map(str::trim).collect()
}

#[test]
fn test_dto_source_layout() {
    let source = synthesize_dto("Product", "mymodule", &GeneratorConfig::default(), &JavaRenderer)
        .unwrap();
    let expected = "\
package org.meveo.mymodule.dto;

import org.meveo.model.customEntities.Product;

public class ProductDto {

    private String type;

    private Product product;

    public String getType() {
        return type;
    }

    public void setType(String type) {
        this.type = type;
    }

    public Product getProduct() {
        return product;
    }

    public void setProduct(Product product) {
        this.product = product;
    }

    public ProductDto() {
    }

    public ProductDto(Product product, String type) {
        this.product = product;
        this.type = type;
    }
}
";
    assert_eq!(source, expected);
}

#[test]
fn test_dto_shape_holds_for_any_identifier() {
    let config = GeneratorConfig::default();
    for entity in ["Product", "X", "Order2", "URLRecord"] {
        let unit = build_dto(entity, "shop", &config);
        assert_eq!(unit.class.fields().count(), 2, "{entity}");
        let accessors: Vec<&str> = unit.class.methods().map(|m| m.name.as_str()).collect();
        assert_eq!(accessors.len(), 4, "{entity}");
        for field in unit.class.fields() {
            let suffix = enterprise_gen::naming::capitalize(&field.name);
            assert!(accessors.contains(&format!("get{suffix}").as_str()));
            assert!(accessors.contains(&format!("set{suffix}").as_str()));
        }
        let all_args = unit.class.constructors().find(|c| c.params.len() == 2).unwrap();
        assert_eq!(all_args.params[0].ty, entity);
        assert_eq!(all_args.params[1].ty, "String");
    }
}

#[test]
fn test_post_endpoint_source() {
    let source = render_endpoint("POST", "", Some("Product"));
    let lines = lines(&source);

    let imports: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| l.starts_with("import "))
        .collect();
    assert_eq!(
        imports,
        vec![
            "import java.io.*;",
            "import java.util.*;",
            "import javax.ws.rs.*;",
            "import javax.ws.rs.core.*;",
            "import javax.enterprise.context.RequestScoped;",
            "import javax.inject.Inject;",
            "import org.meveo.admin.exception.BusinessException;",
            "import org.meveo.base.CustomEndpointResource;",
            "import org.meveo.mymodule.dto.ProductDto;",
            "import org.meveo.script.CreateMyProduct;",
        ]
    );

    assert!(source.starts_with("package org.meveo.mymodule.resource;\n"));
    assert!(source.contains(
        "@Path(\"product\")\n@RequestScoped\npublic class ProductCreate extends CustomEndpointResource {"
    ));
    assert!(source.contains("    @Inject\n    private CreateMyProduct _createMyProduct;"));
    assert!(source.contains(
        "    @POST\n    @Produces(MediaType.APPLICATION_JSON)\n    @Consumes(MediaType.APPLICATION_JSON)\n    public Response saveProduct(ProductDto productDto) {"
    ));

    let body_start = lines
        .iter()
        .position(|l| l.starts_with("public Response saveProduct"))
        .unwrap();
    assert_eq!(
        &lines[body_start + 1..],
        &[
            "String result = null;",
            "parameterMap = new HashMap<String, Object>();",
            "parameterMap.put(\"product\", productDto.getProduct());",
            "parameterMap.put(\"type\", productDto.getType());",
            "setRequestResponse();",
            "try {",
            "_createMyProduct.setProduct(productDto.getProduct());",
            "_createMyProduct.init(parameterMap);",
            "_createMyProduct.execute(parameterMap);",
            "_createMyProduct.finalize(parameterMap);",
            "result = _createMyProduct.getResult();",
            "} catch (BusinessException e) {",
            "return Response.status(Response.Status.BAD_REQUEST).entity(result).build();",
            "}",
            "return Response.status(Response.Status.OK).entity(result).build();",
            "}",
            "}",
        ]
    );
}

#[test]
fn test_post_has_no_path_param() {
    let source = render_endpoint("POST", "/{uuid}", Some("Product"));
    assert!(!source.contains("@PathParam"));
    assert!(!source.contains("setUuid"));
    assert!(!source.contains("parameterMap.put(\"uuid\""));
}

#[test]
fn test_get_endpoint_binds_path_identifier() {
    let source = render_endpoint("GET", "/{uuid}", Some("Product"));

    assert!(source.contains("public class ProductGet extends CustomEndpointResource {"));
    assert!(source.contains(
        "    @GET\n    @Path(\"/{uuid}\")\n    @Produces(MediaType.APPLICATION_JSON)\n    @Consumes(MediaType.APPLICATION_JSON)\n    public Response getProduct(@PathParam(\"uuid\") String uuid) {"
    ));
    assert!(source.contains("parameterMap.put(\"uuid\", uuid);"));
    assert!(source.contains("_createMyProduct.setUuid(uuid);"));
    assert!(!source.contains("ProductDto"));
    assert!(!source.contains("getType()"));
}

#[test]
fn test_put_endpoint_unpacks_dto_and_path_identifier() {
    let source = render_endpoint("PUT", "/{uuid}", Some("Product"));
    let lines = lines(&source);

    assert!(source.contains(
        "public Response updateProduct(ProductDto productDto, @PathParam(\"uuid\") String uuid) {"
    ));
    let map_puts: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| l.starts_with("parameterMap.put"))
        .collect();
    assert_eq!(
        map_puts,
        vec![
            "parameterMap.put(\"product\", productDto.getProduct());",
            "parameterMap.put(\"type\", productDto.getType());",
            "parameterMap.put(\"uuid\", uuid);",
        ]
    );
    let set_product = lines
        .iter()
        .position(|l| *l == "_createMyProduct.setProduct(productDto.getProduct());")
        .unwrap();
    let set_uuid = lines
        .iter()
        .position(|l| *l == "_createMyProduct.setUuid(uuid);")
        .unwrap();
    assert!(set_product < set_uuid);
}

#[test]
fn test_delete_endpoint_reads_identifier_only() {
    let source = render_endpoint("DELETE", "/{product-id}", None);

    assert!(source.contains("public class ProductEndpointDelete extends CustomEndpointResource {"));
    assert!(source.contains(
        "public Response removeProductEndpoint(@PathParam(\"productId\") String productId) {"
    ));
    assert!(source.contains("@Path(\"/{product-id}\")"));
    assert!(source.contains("parameterMap.put(\"productId\", productId);"));
    assert!(source.contains("_createMyProduct.setProductId(productId);"));
    assert!(!source.contains("Dto"));
}

#[test]
fn test_error_path_echoes_result() {
    for method in ["GET", "POST", "PUT", "DELETE"] {
        let source = render_endpoint(method, "/{uuid}", Some("Product"));
        assert!(
            source.contains(
                "} catch (BusinessException e) {\n            return Response.status(Response.Status.BAD_REQUEST).entity(result).build();\n        }"
            ),
            "{method}"
        );
        assert!(!source.contains("e.getMessage()"), "{method}");
    }
}

#[test]
fn test_configured_classes_flow_into_source() {
    let config = GeneratorConfig {
        base_package: "com.acme".to_string(),
        base_resource_class: "com.acme.web.BaseResource".to_string(),
        business_exception_class: "com.acme.errors.DomainException".to_string(),
        entity_package: "com.acme.model".to_string(),
        ..GeneratorConfig::default()
    };
    let ep = endpoint("createProduct", "POST", "", CREATE_SERVICE);
    let ctx = EndpointContext::new(&ep, Some("Product"), "shop");
    let source = synthesize_endpoint(&ctx, &config, &JavaRenderer).unwrap();

    assert!(source.starts_with("package com.acme.shop.resource;"));
    assert!(source.contains("import com.acme.web.BaseResource;"));
    assert!(source.contains("import com.acme.shop.dto.ProductDto;"));
    assert!(source.contains("extends BaseResource {"));
    assert!(source.contains("} catch (DomainException e) {"));

    let dto = synthesize_dto("Product", "shop", &config, &JavaRenderer).unwrap();
    assert!(dto.contains("import com.acme.model.Product;"));
}

#[test]
fn test_rest_config_source() {
    let source =
        synthesize_rest_config("mymodule", &GeneratorConfig::default(), &JavaRenderer).unwrap();
    assert_eq!(
        source,
        "\
package org.meveo.mymodule.rest;

import javax.ws.rs.ApplicationPath;
import javax.ws.rs.core.Application;

@ApplicationPath(\"api\")
public class MymoduleRestConfig extends Application {
}
"
    );
}

#[test]
fn test_synthesis_is_deterministic() {
    for method in ["GET", "POST", "PUT", "DELETE"] {
        assert_eq!(
            render_endpoint(method, "/{uuid}", Some("Product")),
            render_endpoint(method, "/{uuid}", Some("Product"))
        );
    }
    let config = GeneratorConfig::default();
    assert_eq!(
        synthesize_dto("Product", "shop", &config, &JavaRenderer).unwrap(),
        synthesize_dto("Product", "shop", &config, &JavaRenderer).unwrap()
    );
}
