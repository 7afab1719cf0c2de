//! Application-wide constants.
//!
//! All built-in rule tables and magic strings are defined here to ensure
//! consistency and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "modsweep";

/// Default base URL of the running server instance.
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Default admin login on the restored database.
pub const DEFAULT_LOGIN: &str = "admin";

/// Default admin password on the restored database.
pub const DEFAULT_PASSWORD: &str = "admin";

/// Default destination base directory for the cleaned module.
pub const DEFAULT_DESTINATION: &str = "/home/odoo/Downloads";

/// Module name of the Studio export being cleaned.
pub const STUDIO_MODULE: &str = "studio_customization";

/// Automated manifest values forced onto the rewritten manifest.
pub mod manifest_defaults {
    /// Manifest `author` value.
    pub const AUTHOR: &str = "Odoo S.A.";
    /// Manifest `license` value.
    pub const LICENSE: &str = "OPL-1";
    /// Manifest `version` value.
    pub const VERSION: &str = "1.0";
    /// Manifest `images` entry.
    pub const IMAGE: &str = "images/main.png";
}

/// Dependencies required in every cleaned module.
pub const REQUIRED_DEPENDS: &[&str] = &["knowledge"];

/// Fields removed from every XML data file regardless of model.
pub const UNWANTED_FIELDS: &[&str] = &[
    "color",
    "inherited_permission",
    "access_token",
    "document_token",
    "peppol_verification_state",
    "uuid",
];

/// Manifest dependencies stripped from the `depends` list.
///
/// These either pull in Studio itself, paid IAP services, or modules the
/// redistributable industry modules must not require. Entries starting with
/// `theme_` are filtered separately.
pub const UNWANTED_DEPENDS: &[&str] = &[
    "base_module",
    "__import__",
    "account_invoice_extract",
    "account_online_synchronization",
    "account_peppol",
    "auth_totp_mail",
    "base_install_request",
    "crm_iap_enrich",
    "crm_iap_mine",
    "partner_autocomplete",
    "pos_epson_printer",
    "sale_async_emails",
    "snailmail_account",
    "web_grid",
    "web_studio",
    "social_push_notifications",
    "appointment_sms",
    "website_knowledge",
    "base_vat",
    "product_barcodelookup",
    "snailmail_account_followup",
    "base_geolocalize",
    "gamification",
    "l10n_be_pos_sale",
    "pos_sms",
    "pos_settle_due",
    "website_partner",
    "website_project",
    "project_sms",
];

/// Model-specific fields removed from XML records.
///
/// These are volatile, computed on the server, or tied to the source
/// database (dates, states, IAP lookups) and must not ship in a module.
pub const MODEL_FIELD_MAP: &[(&str, &[&str])] = &[
    ("calendar.event", &["start", "stop"]),
    (
        "crm.lead",
        &[
            "email_from",
            "company_id",
            "country_id",
            "city",
            "street",
            "partner_name",
            "contact_name",
            "zip",
            "reveal_id",
            "medium_id",
            "date_closed",
            "email_state",
            "date_open",
            "email_domain_criterion",
            "iap_enrich_done",
            "won_status",
            "street2",
            "phone",
            "state_id",
        ],
    ),
    ("event.event", &["kanban_state_label"]),
    ("hr.department", &["complete_name", "master_department_id"]),
    ("pos.config", &["last_data_change"]),
    (
        "pos.order",
        &[
            "date_order",
            "state",
            "last_order_preparation_change",
            "pos_reference",
            "ticket_code",
            "email",
            "company_id",
        ],
    ),
    (
        "pos.order.line",
        &["full_product_name", "qty_delivered", "price_unit", "total_cost"],
    ),
    ("pos.payment.method", &["is_cash_count"]),
    ("pos.session", &["name", "start_at", "stop_at", "state"]),
    ("product.pricelist.item", &["date_start", "date_end"]),
    ("product.template", &["base_unit_count"]),
    (
        "purchase.order",
        &["date_order", "date_approve", "state", "date_planned"],
    ),
    ("purchase.order.line", &["date_planned", "name"]),
    (
        "res.partner",
        &["supplier_rank", "partner_gid", "partner_weight"],
    ),
    (
        "sale.order",
        &[
            "date_order",
            "prepayment_percent",
            "delivery_status",
            "amount_unpaid",
            "warehouse_id",
            "origin",
        ],
    ),
    ("sale.order.line", &["technical_price_unit", "warehouse_id"]),
    ("sale.order.template", &["prepayment_percent"]),
    ("sign.item", &["transaction_id"]),
];

/// Data files whose record ids get stable, derived replacements.
pub const ID_MAP_FILES: &[&str] = &[
    "ir_model.xml",
    "ir_model_fields.xml",
    "ir_ui_view.xml",
    "ir_default.xml",
    "ir_model_access.xml",
];

/// Data files stripped of records that were not created by the user.
pub const NOT_USER_CREATED_FILES: &[&str] = &[
    "ir_attachment_pre.xml",
    "knowledge_cover.xml",
    "mail_template.xml",
];

/// Data files deleted (and dropped from the manifest) when left empty.
pub const PRUNE_WHEN_EMPTY_FILES: &[&str] = &[
    "ir_attachment_pre.xml",
    "knowledge_cover.xml",
    "mail_template.xml",
    "product_pricelist.xml",
];

/// File names used by the circular-dependency resolution.
pub mod circular {
    /// Warnings file written next to the export by the server.
    pub const WARNINGS_FILE: &str = "warnings.txt";
    /// Mapping file restoring the removed fields after initial load.
    pub const MAP_FILE: &str = "map_circular_dependencies.xml";
}

/// Scaffold file templates.
///
/// `{module}` is replaced with the module slug, `{title}` with its
/// title-cased form.
pub mod templates {
    /// Onboarding tour registered under the module's name.
    pub const TOUR_JS: &str = r#"import { _t } from "@web/core/l10n/translation";
import { registry } from "@web/core/registry";

registry.category("web_tour.tours").add("{module}_knowledge_tour", {
    url: "/odoo",
    steps: () => [
        {
            trigger: '.o_app[data-menu-xmlid="knowledge.knowledge_menu_root"]',
            content: _t("Get on track and explore our recommendations for your Odoo usage here!"),
            run: "click",
        },
    ],
});
"#;

    /// Welcome notification posted to the all-employees channel.
    pub const MAIL_MESSAGE_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<odoo noupdate="1">
    <record model="mail.message" id="notification_knowledge">
        <field name="model">discuss.channel</field>
        <field name="res_id" ref="mail.channel_all_employees"/>
        <field name="message_type">email</field>
        <field name="author_id" ref="base.partner_root"/>
        <field name="subtype_id" ref="mail.mt_comment"/>
        <field name="subject">🚀 Get started with Odoo {title} Shop</field>
        <field name="body" model="knowledge.article" eval="
            '&lt;span>&#x1F44B; Hi! Follow this &lt;a href=\''
             + obj().env.ref('{module}.welcome_article').article_url
             + '\'>onboarding guide&lt;/a>. You can find it anytime in the Knowledge app.&lt;/span>'"/>
    </record>
</odoo>
"#;

    /// Favorite pin for the welcome article.
    pub const KNOWLEDGE_FAVORITE_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<odoo noupdate="1">
    <record id="knowledge_favorite" model="knowledge.article.favorite">
        <field name="article_id" ref="welcome_article"/>
        <field name="user_id" ref="base.user_admin"/>
    </record>
</odoo>
"#;

    /// Tour record pointing at the registered JS tour.
    pub const KNOWLEDGE_TOUR_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<odoo noupdate="1">
    <record id="knowledge_tour" model="web_tour.tour">
        <field name="name">{module}_knowledge_tour</field>
        <field name="sequence">2</field>
        <field name="rainbow_man_message">Welcome! Happy exploring.</field>
    </record>
</odoo>
"#;

    /// Demo payment provider installer.
    pub const PAYMENT_PROVIDER_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<odoo noupdate="1">
    <function name="button_immediate_install" model="ir.module.module" eval="[ref('base.module_payment_demo')]"/>
</odoo>
"#;
}

/// Relative paths of the scaffold files written into every cleaned module.
pub mod scaffold_paths {
    /// Tour JS destination.
    pub const TOUR_JS: &str = "static/src/js/my_tour.js";
    /// Welcome notification destination.
    pub const MAIL_MESSAGE: &str = "data/mail_message.xml";
    /// Favorite pin destination.
    pub const KNOWLEDGE_FAVORITE: &str = "data/knowledge_article_favorite.xml";
    /// Tour record destination.
    pub const KNOWLEDGE_TOUR: &str = "data/knowledge_tour.xml";
    /// Demo payment provider destination.
    pub const PAYMENT_PROVIDER: &str = "demo/payment_provider_demo.xml";
    /// Theme/SCSS function file destination.
    pub const THEME_APPLY: &str = "demo/website_theme_apply.xml";
}

/// Manifest `data` entries injected for the scaffold files.
pub const INJECTED_DATA_FILES: &[&str] = &[
    "data/mail_message.xml",
    "data/knowledge_article_favorite.xml",
    "data/knowledge_tour.xml",
];
