//! Fixed `GraphQL` operation documents.
//!
//! Every cart operation selects the same cart shape (via the shared
//! fragment) so the response envelope can be normalized in one place.

macro_rules! cart_fields {
    () => {
        r"
fragment CartFields on Cart {
  id
  checkoutUrl
  cost {
    totalAmount {
      amount
      currencyCode
    }
  }
  lines(first: 50) {
    edges {
      node {
        id
        quantity
        merchandise {
          ... on ProductVariant {
            id
            title
            image {
              url
            }
            product {
              title
            }
          }
        }
        cost {
          totalAmount {
            amount
            currencyCode
          }
        }
      }
    }
  }
}"
    };
}

/// Create an empty cart.
pub const CART_CREATE: &str = concat!(
    r"
mutation cartCreate($input: CartInput!) {
  cartCreate(input: $input) {
    cart {
      ...CartFields
    }
    userErrors {
      code
      field
      message
    }
  }
}",
    cart_fields!()
);

/// Add lines to an existing cart.
pub const CART_LINES_ADD: &str = concat!(
    r"
mutation cartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart {
      ...CartFields
    }
    userErrors {
      code
      field
      message
    }
  }
}",
    cart_fields!()
);

/// Update line quantities on an existing cart.
pub const CART_LINES_UPDATE: &str = concat!(
    r"
mutation cartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {
    cart {
      ...CartFields
    }
    userErrors {
      code
      field
      message
    }
  }
}",
    cart_fields!()
);

/// Remove lines from an existing cart.
pub const CART_LINES_REMOVE: &str = concat!(
    r"
mutation cartLinesRemove($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart {
      ...CartFields
    }
    userErrors {
      code
      field
      message
    }
  }
}",
    cart_fields!()
);

/// Read one cart by identifier.
pub const CART_QUERY: &str = concat!(
    r"
query cart($cartId: ID!) {
  cart(id: $cartId) {
    ...CartFields
  }
}",
    cart_fields!()
);

/// List the catalog, newest first.
pub const PRODUCTS_QUERY: &str = r"
query {
  products(first: 100, sortKey: CREATED_AT, reverse: true) {
    edges {
      node {
        id
        title
        description
        handle
        priceRange {
          minVariantPrice {
            amount
            currencyCode
          }
        }
        images(first: 1) {
          edges {
            node {
              url
              altText
            }
          }
        }
        variants(first: 1) {
          edges {
            node {
              id
            }
          }
        }
      }
    }
  }
}";

/// Read one product by its global id.
pub const PRODUCT_BY_ID_QUERY: &str = r"
query product($id: ID!) {
  node(id: $id) {
    ... on Product {
      id
      title
      description
      handle
      priceRange {
        minVariantPrice {
          amount
          currencyCode
        }
      }
      images(first: 6) {
        edges {
          node {
            url
            altText
          }
        }
      }
      variants(first: 10) {
        edges {
          node {
            id
            title
            price {
              amount
              currencyCode
            }
            compareAtPrice {
              amount
              currencyCode
            }
          }
        }
      }
    }
  }
}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_operations_share_the_cart_fragment() {
        for document in [
            CART_CREATE,
            CART_LINES_ADD,
            CART_LINES_UPDATE,
            CART_LINES_REMOVE,
            CART_QUERY,
        ] {
            assert!(
                document.contains("fragment CartFields on Cart"),
                "cart document is missing the shared fragment"
            );
        }
    }

    #[test]
    fn test_mutations_select_user_errors() {
        for document in [
            CART_CREATE,
            CART_LINES_ADD,
            CART_LINES_UPDATE,
            CART_LINES_REMOVE,
        ] {
            assert!(
                document.contains("userErrors"),
                "mutation document does not select userErrors"
            );
        }
    }
}
