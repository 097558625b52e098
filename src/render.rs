use color_eyre::eyre::Result;
use handlebars::Handlebars;
use serde::Serialize;

use crate::{
    form::{Field, FormState},
    types::place::Place,
};

const PAGE: &str = "page";

#[derive(Serialize)]
struct FieldView<'a> {
    name: &'static str,
    label: &'static str,
    value: &'a str,
    error: Option<&'static str>,
    valid: bool,
}

#[derive(Serialize)]
struct RowView<'a> {
    lat: String,
    lng: String,
    name: &'a str,
    map_link: String,
}

impl<'a> From<&'a Place> for RowView<'a> {
    fn from(place: &'a Place) -> Self {
        RowView {
            lat: place.lat.to_string(),
            lng: place.lng.to_string(),
            name: &place.name,
            map_link: place.map_link(),
        }
    }
}

#[derive(Serialize)]
struct PageView<'a> {
    form_id: u64,
    fields: Vec<FieldView<'a>>,
    loading: bool,
    can_submit: bool,
    notice: Option<String>,
    error: Option<&'a str>,
    rows: Vec<RowView<'a>>,
}

/// Renders a form instance as a full HTML page
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(PAGE, include_str!("../templates/page.hbs"))?;
        Ok(Self { handlebars })
    }

    pub fn page(&self, form_id: u64, form: &FormState) -> Result<String> {
        let values = form.values();
        let errors = form.field_errors();
        let field = |field, name, label, value| FieldView {
            name,
            label,
            value,
            error: errors.get(field),
            valid: form.submitted() && errors.get(field).is_none(),
        };
        let view = PageView {
            form_id,
            fields: vec![
                field(Field::Latitude, "latitude", "Latitude", values.latitude.as_str()),
                field(Field::Longitude, "longitude", "Longitude", values.longitude.as_str()),
                field(Field::Radius, "radius", "Radius", values.radius.as_str()),
            ],
            loading: form.loading(),
            can_submit: form.can_submit(),
            notice: form.notice().map(|notice| notice.to_string()),
            error: form.error(),
            rows: form.places().iter().map(RowView::from).collect(),
        };
        Ok(self.handlebars.render(PAGE, &view)?)
    }
}
