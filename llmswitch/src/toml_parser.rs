use toml::Table;
use toml::Value;
use crate::options::Options;
use crate::error::AppError;
use crate::util::parse_colors;

fn get_str_val<'a>(val: &'a Value, err: &'static str) -> Result<&'a str, AppError> {
    if !val.is_str() {
        return Err(AppError::ConfigParseError(err));
    }
    val.as_str().ok_or(AppError::Unknown)
}

fn get_int_val(val: &Value, err: &'static str) -> Result<i64, AppError> {
    if !val.is_integer() {
        return Err(AppError::ConfigParseError(err));
    }
    val.as_integer().ok_or(AppError::Unknown)
}

// Integers are accepted where a float is expected, e.g. `temperature = 1`.
fn get_float_val(val: &Value, err: &'static str) -> Result<f64, AppError> {
    match val {
        Value::Float(f) => Ok(*f),
        Value::Integer(i) => Ok(*i as f64),
        _ => Err(AppError::ConfigParseError(err)),
    }
}

fn get_bool_val(val: &Value, err: &'static str) -> Result<bool, AppError> {
    val.as_bool().ok_or(AppError::ConfigParseError(err))
}

fn get_color_val(val: &Value, err: &'static str) -> Result<(Option<[u8;3]>, Option<[u8;3]>), AppError> {
    let s = get_str_val(val, err)?;
    parse_colors(s).map_err(|_| AppError::ConfigParseError(err))
}

pub fn parse_toml_config(content: &str, options: &mut Options) -> Result<(), AppError> {

    let toml_config: Table = toml::from_str(content)?;

    if let Some(val) = toml_config.get("provider") {
        options.provider.replace(get_str_val(val, "provider must be a string value")?.to_owned());
    }

    if let Some(val) = toml_config.get("template") {
        options.template.replace(get_str_val(val, "template must be a string value")?.to_owned());
    }

    if let Some(val) = toml_config.get("fail_fast") {
        options.fail_fast = get_bool_val(val, "fail_fast must be a boolean value")?;
    }

    if let Some(val) = toml_config.get("timeout") {
        let timeout = get_int_val(val, "timeout must be an integer value")?;
        let timeout = u64::try_from(timeout).map_err(|_| AppError::ConfigParseError("timeout must not be negative"))?;
        options.timeout.replace(timeout);
    }

    if let Some(section) = toml_config.get("parameters") {
        let params = section.as_table().ok_or(AppError::ConfigParseError("parameters must be a table"))?;

        if let Some(val) = params.get("temperature") {
            options.temperature.replace(get_float_val(val, "temperature must be a float value")?);
        }

        if let Some(val) = params.get("max_tokens") {
            options.max_tokens.replace(get_int_val(val, "max_tokens must be an integer value")?);
        }

        if let Some(val) = params.get("top_k") {
            options.top_k.replace(get_int_val(val, "top_k must be an integer value")?);
        }

        if let Some(val) = params.get("top_p") {
            options.top_p.replace(get_float_val(val, "top_p must be a float value")?);
        }
    }

    if let Some(settings_section) = toml_config.get("settings") {
        if let Some(settings) = settings_section.as_table() {
            if let Some(user_color) = settings.get("user_color") {
                options.user_color = get_color_val(user_color, "user_color value must have valid format, e.g. 'fg(255,0,123);bg(0,123,255)'.")?;
            }
            if let Some(assistant_color) = settings.get("assistant_color") {
                options.assistant_color = get_color_val(assistant_color, "assistant_color value must have valid format, e.g. 'fg(255,0,123);bg(0,123,255)'.")?;
            }
        }
    }

    Ok(())
}
