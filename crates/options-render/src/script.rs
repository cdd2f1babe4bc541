//! Browser runtime for option forms.
//!
//! Driven entirely by the `data-` attributes the renderers emit, so it does
//! not depend on the class prefix. Mirrors the server-side rules in
//! `options_core::rules` and `options_core::surcharge`.

use crate::fragment::Fragment;

/// The runtime `<script>` block.
pub fn option_form_script() -> Fragment {
    Fragment::new(format!("<script>{}</script>", RUNTIME))
}

const RUNTIME: &str = r#"
(function () {
    function places(root) {
        return parseInt(root.dataset.decimals || '2', 10);
    }

    function toMinor(value, digits) {
        var n = parseFloat(value);
        return isFinite(n) && n > 0 ? Math.round(n * Math.pow(10, digits)) : 0;
    }

    function isActive(option) {
        return !option.closest('fieldset[disabled]');
    }

    function field(option) {
        return option.querySelector('input:not([type=radio]), select');
    }

    function currentValue(option) {
        if (option.dataset.optionType === 'radio') {
            var checked = option.querySelector('input[type=radio]:checked');
            return checked ? checked.value : '';
        }
        var el = field(option);
        return el ? el.value.trim() : '';
    }

    function surcharge(option, digits) {
        var value = currentValue(option);
        if (value === '') {
            return 0;
        }
        switch (option.dataset.optionType) {
            case 'text':
            case 'number':
            case 'dropdown':
                return toMinor(option.dataset.price, digits);
            case 'dropdown_thumbnail':
                var chosen = field(option).selectedOptions[0];
                return chosen ? toMinor(chosen.dataset.price, digits) : 0;
            default:
                return 0;
        }
    }

    function refresh(root) {
        var digits = places(root);
        var total = 0;
        var blob = {};
        root.querySelectorAll('[data-option-id]').forEach(function (option) {
            if (!isActive(option)) {
                return;
            }
            total += surcharge(option, digits);
            var value = currentValue(option);
            if (value !== '') {
                blob[option.dataset.optionName] = value;
            }
        });

        var price = root.querySelector('[data-additional-price]');
        if (price) {
            price.value = total > 0 ? (total / Math.pow(10, digits)).toFixed(digits) : '';
            price.disabled = total <= 0;
        }
        var options = root.querySelector('[data-options-blob]');
        if (options) {
            options.value = JSON.stringify(blob);
        }
    }

    function applyVisibility(root, radio) {
        var checked = radio.querySelector('input[type=radio]:checked');
        var selected = checked ? checked.value : null;
        root.querySelectorAll('[data-depend-on]').forEach(function (wrapper) {
            if (wrapper.dataset.dependOn !== radio.dataset.optionId) {
                return;
            }
            var visible = selected === wrapper.dataset.showWhen;
            wrapper.disabled = !visible;
            wrapper.hidden = !visible;
        });
    }

    function notify(root, input, message) {
        var option = input.closest('[data-option-id]');
        var notice = option && option.querySelector('[data-notice]');
        if (!notice) {
            return;
        }
        notice.textContent = message;
        notice.hidden = false;
        clearTimeout(notice._timer);
        notice._timer = setTimeout(function () {
            notice.hidden = true;
        }, parseInt(root.dataset.noticeMs || '2500', 10));
    }

    function clamp(root, input, clearInvalid) {
        if (input.value === '') {
            if (clearInvalid && input.validity.badInput) {
                input.value = '';
            }
            return;
        }
        var n = Number(input.value);
        if (isNaN(n)) {
            input.value = '';
            return;
        }
        var min = Number(input.min);
        var max = Number(input.max);
        if (n < min || n > max) {
            var bound = n < min ? min : max;
            input.value = String(bound);
            notify(root, input, 'Adjusted to ' + bound + ' (allowed ' + min + '-' + max + ')');
        } else if (clearInvalid) {
            input.value = String(Math.trunc(n));
        }
    }

    function bind(root) {
        root.addEventListener('input', function (event) {
            var target = event.target;
            if (target.matches('[data-filter=digits]')) {
                var stripped = target.value.replace(/[0-9]/g, '');
                if (stripped !== target.value) {
                    target.value = stripped;
                }
            } else if (target.matches('[data-clamp]')) {
                clamp(root, target, false);
            }
            refresh(root);
        });

        root.addEventListener('change', function (event) {
            var target = event.target;
            if (target.matches('[data-clamp]')) {
                clamp(root, target, true);
            }
            if (target.type === 'radio') {
                var radio = target.closest('[data-option-type=radio]');
                if (radio) {
                    applyVisibility(root, radio);
                }
            }
            if (target.tagName === 'SELECT') {
                syncSwatches(root, target);
            }
            refresh(root);
        });

        root.addEventListener('focusout', function (event) {
            if (event.target.matches('[data-clamp]')) {
                clamp(root, event.target, true);
                refresh(root);
            }
        });

        root.addEventListener('click', function (event) {
            var swatch = event.target.closest('[data-swatch-for]');
            if (!swatch) {
                return;
            }
            var select = document.getElementById(swatch.dataset.swatchFor);
            if (select) {
                select.value = swatch.dataset.value;
                select.dispatchEvent(new Event('change', { bubbles: true }));
            }
        });
    }

    function syncSwatches(root, select) {
        root.querySelectorAll('[data-swatch-for]').forEach(function (swatch) {
            if (swatch.dataset.swatchFor === select.id) {
                swatch.setAttribute('aria-pressed', String(swatch.dataset.value === select.value));
            }
        });
    }

    document.querySelectorAll('[data-option-form]').forEach(function (root) {
        bind(root);
        refresh(root);
    });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_block() {
        let script = option_form_script().into_string();
        assert!(script.starts_with("<script>"));
        assert!(script.ends_with("</script>"));
        assert!(script.contains("[data-depend-on]"));
        assert!(script.contains("[data-additional-price]"));
    }
}
