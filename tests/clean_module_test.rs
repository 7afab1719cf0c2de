//! End-to-end cleanup over a synthetic Studio export (offline).

#![allow(clippy::unwrap_used)]

use modsweep::config::Config;
use modsweep::manifest::{RewriteOptions, parse_manifest};
use modsweep::pipeline::{CleanOptions, clean_module};
use modsweep::xml::Document;
use std::path::{Path, PathBuf};

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Lay out a small but representative export.
fn build_fixture(root: &Path) -> PathBuf {
    let export = root.join("studio_customization");

    write(
        &export,
        "__manifest__.py",
        r"{
    'name': 'Studio customizations',
    'description': 'Exported customizations',
    'category': 'Customizations',
    'version': '0.0.1',
    'author': 'Studio',
    'license': 'LGPL-3',
    'depends': [
        'base',
        'web_studio',
        'sale',
        'theme_orbit',
    ],
    'data': [
        'data/ir_model.xml',
        'data/ir_model_fields.xml',
        'data/ir_default.xml',
        'data/knowledge_article.xml',
        'data/mail_template.xml',
        'data/product_pricelist.xml',
        'data/res_partner.xml',
        'data/sale_order.xml',
    ],
    'demo': [
        'demo/website.xml',
    ],
}
",
    );

    write(
        &export,
        "warnings.txt",
        "Found 1 circular dependencies:\n(data) res.partner -> sale.order\n",
    );

    write(
        &export,
        "data/ir_model.xml",
        r#"<odoo>
  <record id="ir_model_1a2b" model="ir.model">
    <field name="model">x_grooming.service</field>
    <field name="name">Grooming Service</field>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "data/ir_model_fields.xml",
        r#"<odoo>
  <record id="ir_model_fields_3c4d" model="ir.model.fields">
    <field name="model_id" ref="ir_model_1a2b"/>
    <field name="name">x_studio_duration</field>
    <field name="ttype">char</field>
    <field name="on_delete" eval="False"/>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "data/ir_default.xml",
        r#"<odoo>
  <record id="ir_default_9f8e" model="ir.default">
    <field name="field_id" ref="ir_model_fields_3c4d"/>
    <field name="json_value">"30"</field>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "data/knowledge_article.xml",
        r#"<odoo noupdate="1">
  <record id="knowledge_article_42" model="knowledge.article">
    <field name="name">Welcome to Pet Shop</field>
    <field name="body">&lt;div class="intro"&gt;Welcome&lt;/div&gt;</field>
    <field name="last_edition_uid" ref="res_users_8abc"/>
  </record>
</odoo>"#,
    );

    // Only a namespaced record: the file ends up empty and is pruned.
    write(
        &export,
        "data/mail_template.xml",
        r#"<odoo>
  <record id="mail.template_welcome" model="mail.template">
    <field name="subject">Welcome</field>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "data/product_pricelist.xml",
        r#"<odoo>
  <record id="pricelist_default" model="product.pricelist">
    <field name="name">Default</field>
  </record>
  <record id="pricelist_retail" model="product.pricelist">
    <field name="name">Retail</field>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "data/res_partner.xml",
        r#"<odoo>
  <record id="partner_griffin" model="res.partner">
    <field name="name">Griffin Kennels</field>
    <field name="supplier_rank">1</field>
    <field name="property_product_pricelist" ref="pricelist_default"/>
    <field name="sale_order_ids" eval="[(6, 0, [ref('sale_order_1')])]"/>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "data/sale_order.xml",
        r#"<odoo>
  <record id="sale_order_1" model="sale.order">
    <field name="partner_id" ref="partner_griffin"/>
    <field name="date_order">2024-01-01</field>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "demo/website.xml",
        r#"<odoo>
  <record id="website_1" model="website">
    <field name="name">Pet Shop</field>
    <field name="theme_id" ref="base.module_theme_orbit"/>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "demo/ir_ui_view.xml",
        r#"<odoo>
  <record id="view_homepage" model="ir.ui.view">
    <field name="key">website.homepage</field>
    <field name="type">qweb</field>
    <field name="arch" type="xml">banner_pets on https://petparadise.odoo.com/shop</field>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "demo/ir_attachment_post.xml",
        r#"<odoo>
  <record id="ir_attachment_5" model="ir.attachment">
    <field name="name">banner_pets</field>
    <field name="res_model">ir.ui.view</field>
  </record>
  <record id="ir_attachment_2" model="ir.attachment">
    <field name="name">banner_pets</field>
  </record>
  <record id="ir_attachment_9" model="ir.attachment">
    <field name="name">unused_art</field>
  </record>
</odoo>"#,
    );

    write(
        &export,
        "ir_attachment/user_color_palette.scss",
        "$o-user-map: o-map-omit((\n    'primary': #714B67,\n));\n",
    );
    write(&export, "ir_attachment/logo.png", "png-bytes");
    write(&export, "static/description/icon", "icon-bytes");

    export
}

fn options(export: &Path, destination: &Path) -> CleanOptions {
    let config = Config::default();
    let mut rewrite = RewriteOptions::new("pet_shop", "pet_services");
    rewrite.unwanted_depends = config.unwanted_depends();
    rewrite.required_depends = config.rules.required_depends.clone();

    CleanOptions {
        module_name: "pet_shop".to_string(),
        studio_path: export.to_path_buf(),
        destination: destination.to_path_buf(),
        db_name: "pet_shop_db".to_string(),
        port: 8069,
        base_url: "http://localhost".to_string(),
        login: "admin".to_string(),
        password: "admin".to_string(),
        offline: true,
        skip_db_reset: true,
        force: false,
        progress_enabled: false,
        unwanted_fields: config.unwanted_fields(),
        rewrite,
    }
}

#[test]
fn test_full_offline_cleanup() {
    let tmp = tempfile::tempdir().unwrap();
    let export = build_fixture(tmp.path());
    let destination = tmp.path().join("out");

    let summary = clean_module(&options(&export, &destination)).unwrap();
    let module_dir = destination.join("pet_shop");
    assert_eq!(summary.destination, module_dir);
    assert!(summary.xml_files >= 9);
    assert_eq!(summary.circular_fields, 1);
    assert_eq!(summary.scss_customizations, 1);

    // --- manifest ---
    let manifest_text = std::fs::read_to_string(module_dir.join("__manifest__.py")).unwrap();
    let manifest = parse_manifest(&manifest_text).unwrap();

    assert_eq!(
        manifest.get("name").and_then(|v| v.as_str()),
        Some("Pet Shop")
    );
    assert_eq!(
        manifest.get("category").and_then(|v| v.as_str()),
        Some("Pet Services")
    );
    assert_eq!(
        manifest.get("license").and_then(|v| v.as_str()),
        Some("OPL-1")
    );
    assert!(manifest.get("description").is_none());

    assert_eq!(
        manifest.string_list("depends"),
        vec!["base", "knowledge", "sale"]
    );

    let data = manifest.string_list("data");
    assert!(!data.contains(&"data/mail_template.xml".to_string()));
    assert!(data.contains(&"data/mail_message.xml".to_string()));
    assert!(data.contains(&"data/knowledge_tour.xml".to_string()));
    assert_eq!(
        data.last().map(String::as_str),
        Some("data/map_circular_dependencies.xml")
    );

    let demo = manifest.string_list("demo");
    assert!(demo.contains(&"demo/website_view.xml".to_string()));
    assert!(demo.contains(&"demo/website.xml".to_string()));
    assert!(!demo.contains(&"demo/ir_ui_view.xml".to_string()));

    // --- id remapping and identifier renames ---
    let fields_xml =
        std::fs::read_to_string(module_dir.join("data/ir_model_fields.xml")).unwrap();
    assert!(fields_xml.contains(r#"id="x_grooming_service_model_x_duration_field""#));
    assert!(fields_xml.contains(r#"ref="x_grooming_service_model""#));
    assert!(!fields_xml.contains("x_studio_"));

    let default_xml = std::fs::read_to_string(module_dir.join("data/ir_default.xml")).unwrap();
    assert!(default_xml.contains("<odoo noupdate=\"1\">"));
    assert!(
        default_xml.contains(r#"ref="x_grooming_service_model_x_duration_field""#)
    );

    // --- model-based and pricelist field removal ---
    let partner_xml = std::fs::read_to_string(module_dir.join("data/res_partner.xml")).unwrap();
    assert!(!partner_xml.contains("supplier_rank"));
    assert!(!partner_xml.contains("pricelist_default"));
    let order_xml = std::fs::read_to_string(module_dir.join("data/sale_order.xml")).unwrap();
    assert!(!order_xml.contains("date_order"));

    // --- circular dependency break + map file ---
    assert!(!partner_xml.contains("sale_order_ids"));
    let map_xml =
        std::fs::read_to_string(module_dir.join("data/map_circular_dependencies.xml")).unwrap();
    let map_doc = Document::parse(&map_xml).unwrap();
    assert_eq!(map_doc.records()[0].attr("id"), Some("partner_griffin"));
    assert!(map_xml.contains("sale_order_ids"));

    // --- pricelist default record removed, file kept ---
    let pricelist_xml =
        std::fs::read_to_string(module_dir.join("data/product_pricelist.xml")).unwrap();
    assert!(!pricelist_xml.contains("Default"));
    assert!(pricelist_xml.contains("Retail"));

    // --- knowledge article ---
    let article_xml =
        std::fs::read_to_string(module_dir.join("data/knowledge_article.xml")).unwrap();
    assert!(article_xml.contains(r#"id="welcome_article""#));
    assert!(article_xml.contains("is_locked"));
    assert!(!article_xml.contains("last_edition_uid"));
    assert!(article_xml.contains("<![CDATA["));

    // --- website demo files ---
    assert!(!module_dir.join("demo/ir_ui_view.xml").exists());
    let view_xml = std::fs::read_to_string(module_dir.join("demo/website_view.xml")).unwrap();
    assert!(view_xml.contains("pet_shop.homepage"));
    assert!(view_xml.contains("https://pet-shop.odoo.com/shop"));

    let attachments_xml =
        std::fs::read_to_string(module_dir.join("demo/ir_attachment_post.xml")).unwrap();
    let attachments = Document::parse(&attachments_xml).unwrap();
    let ids: Vec<_> = attachments
        .records()
        .iter()
        .filter_map(|r| r.attr("id").map(str::to_string))
        .collect();
    assert_eq!(ids, vec!["ir_attachment_2", "ir_attachment_5"]);
    assert!(!attachments_xml.contains("res_model"));

    let theme_xml =
        std::fs::read_to_string(module_dir.join("demo/website_theme_apply.xml")).unwrap();
    assert!(theme_xml.contains("base.module_theme_orbit"));
    assert!(theme_xml.contains("make_scss_customization"));
    assert!(theme_xml.contains("user_color_palette.scss"));

    // --- scaffold and copies ---
    assert!(module_dir.join("static/src/js/my_tour.js").exists());
    assert!(module_dir.join("data/mail_message.xml").exists());
    assert!(module_dir.join("data/knowledge_article_favorite.xml").exists());
    assert!(module_dir.join("data/knowledge_tour.xml").exists());
    assert!(module_dir.join("ir_attachment/logo.png").exists());
    assert!(module_dir.join("static/description/icon").exists());
    assert!(!module_dir.join("ir_attachment/user_color_palette.scss").exists());
    assert!(!module_dir.join("data/mail_template.xml").exists());
}

#[test]
fn test_existing_destination_requires_force() {
    let tmp = tempfile::tempdir().unwrap();
    let export = build_fixture(tmp.path());
    let destination = tmp.path().join("out");
    std::fs::create_dir_all(destination.join("pet_shop")).unwrap();

    let err = clean_module(&options(&export, &destination)).unwrap_err();
    assert!(err.to_string().contains("--force"));

    let mut opts = options(&export, &destination);
    opts.force = true;
    clean_module(&opts).unwrap();
    assert!(destination.join("pet_shop/__manifest__.py").exists());
}

#[test]
fn test_missing_export_directory_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope");
    let destination = tmp.path().join("out");

    let err = clean_module(&options(&missing, &destination)).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
